//! Orchestrator discovery and the fatal bootstrap failure taxonomy.
//!
//! Configuration cannot start without a compatible orchestrator install, so
//! everything in here resolves to one of three terminal outcomes: a located
//! [`Orchestrator`], "nothing is installed" guidance, or "something is
//! installed but it is not the orchestrator this project builds with"
//! guidance. The distinction matters to users: the first asks them to
//! install, the second to upgrade or repair.
//!
//! Candidates are considered in a fixed order: an explicit path handed to
//! the probe, the `AMBUILD` environment variable, then every directory on
//! `PATH`. The first candidate that exists on disk decides the outcome; a
//! binary that fails the version gate never falls through to a later one.

use std::env;
use std::path::PathBuf;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::version::{self, ToolVersion};

/// Major version of the orchestrator this front-end registers options
/// against.
pub const REQUIRED_MAJOR: u32 = 2;

/// Environment variable naming an explicit orchestrator binary.
pub const ENV_OVERRIDE: &str = "AMBUILD";

#[cfg(windows)]
const TOOL_FILE_NAMES: &[&str] = &["ambuild.exe", "ambuild.cmd", "ambuild.bat"];
#[cfg(not(windows))]
const TOOL_FILE_NAMES: &[&str] = &["ambuild"];

/// A located, version-checked orchestrator binary.
#[derive(Debug, Clone, Serialize)]
pub struct Orchestrator {
    pub path: PathBuf,
    pub version: ToolVersion,
}

/// Why no usable orchestrator could be resolved. Every variant is fatal to
/// the bootstrap and carries its own user guidance.
#[derive(Debug, Error)]
pub enum LocateError {
    /// No candidate binary exists anywhere we looked.
    #[error("AMBuild must be installed to build this project\nhttp://www.alliedmods.net/ambuild")]
    Missing,

    /// A binary exists but its major version is out of contract.
    #[error("it looks like AMBuild {found} is installed at {}, but this project uses AMBuild {required}\nupgrade to the latest version of AMBuild to continue", .path.display())]
    Incompatible {
        path: PathBuf,
        found: ToolVersion,
        required: u32,
    },

    /// A binary exists but did not report a usable version.
    #[error("{} is present but did not report a usable AMBuild version: {reason}\nreinstall AMBuild from http://www.alliedmods.net/ambuild", .path.display())]
    Probe { path: PathBuf, reason: String },
}

/// Trait for enumerating candidate orchestrator binaries from some backing
/// store (filesystem probe, tests, etc.). Order is significant.
pub trait ToolDiscovery {
    fn candidates(&self) -> Vec<PathBuf>;
}

/// Filesystem locator for the orchestrator binary.
#[derive(Debug, Clone)]
pub struct OrchestratorProbe {
    explicit: Option<PathBuf>,
    env_var: String,
    required_major: u32,
}

impl OrchestratorProbe {
    pub fn new() -> Self {
        Self {
            explicit: None,
            env_var: ENV_OVERRIDE.to_string(),
            required_major: REQUIRED_MAJOR,
        }
    }

    /// Check this path before any environment or `PATH` candidate.
    pub fn explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Use a different environment variable for the override slot.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    pub fn required_major(mut self, major: u32) -> Self {
        self.required_major = major;
        self
    }

    /// Resolve the first existing candidate and enforce the version gate.
    pub fn locate(&self) -> Result<Orchestrator, LocateError> {
        locate_from(self, self.required_major)
    }
}

impl Default for OrchestratorProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDiscovery for OrchestratorProbe {
    fn candidates(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();

        if let Some(path) = &self.explicit {
            found.push(path.clone());
        }

        if let Some(raw) = env::var_os(&self.env_var) {
            if !raw.is_empty() {
                found.push(PathBuf::from(raw));
            }
        }

        if let Some(path_var) = env::var_os("PATH") {
            for dir in env::split_paths(&path_var) {
                for name in TOOL_FILE_NAMES {
                    found.push(dir.join(name));
                }
            }
        }

        found
    }
}

/// Resolve the first existing candidate from `discovery`, probe its
/// version, and enforce `required_major`.
pub fn locate_from(
    discovery: &impl ToolDiscovery,
    required_major: u32,
) -> Result<Orchestrator, LocateError> {
    for candidate in discovery.candidates() {
        if !candidate.is_file() {
            continue;
        }
        debug!("probing orchestrator candidate {}", candidate.display());

        let found = version::probe(&candidate).map_err(|err| LocateError::Probe {
            path: candidate.clone(),
            reason: format!("{err:#}"),
        })?;

        if found.major != required_major {
            return Err(LocateError::Incompatible {
                path: candidate,
                found,
                required: required_major,
            });
        }

        debug!("located AMBuild {} at {}", found, candidate.display());
        return Ok(Orchestrator {
            path: candidate,
            version: found,
        });
    }

    Err(LocateError::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCandidates(Vec<PathBuf>);

    impl ToolDiscovery for FixedCandidates {
        fn candidates(&self) -> Vec<PathBuf> {
            self.0.clone()
        }
    }

    #[test]
    fn nothing_on_disk_is_missing() {
        let discovery = FixedCandidates(vec![
            PathBuf::from("/definitely/not/here/ambuild"),
            PathBuf::from("/also/not/here/ambuild"),
        ]);
        let err = locate_from(&discovery, REQUIRED_MAJOR).expect_err("should be missing");
        assert!(matches!(err, LocateError::Missing));
        assert!(err.to_string().contains("must be installed"));
        assert!(err.to_string().contains("alliedmods.net"));
    }

    #[test]
    fn missing_message_names_the_install_location() {
        let text = LocateError::Missing.to_string();
        assert!(text.contains("http://www.alliedmods.net/ambuild"));
    }

    #[test]
    fn incompatible_message_asks_for_an_upgrade() {
        let err = LocateError::Incompatible {
            path: PathBuf::from("/usr/bin/ambuild"),
            found: ToolVersion::new(1, 0, 4166),
            required: REQUIRED_MAJOR,
        };
        let text = err.to_string();
        assert!(text.contains("AMBuild 1.0.4166"));
        assert!(text.contains("uses AMBuild 2"));
        assert!(text.contains("upgrade"));
    }

    #[test]
    fn probe_candidates_keep_explicit_before_env_and_path() {
        let probe = OrchestratorProbe::new()
            .explicit_path("/opt/custom/ambuild")
            .env_var("AMCONF_TEST_UNSET_OVERRIDE");
        let candidates = probe.candidates();
        assert_eq!(candidates.first(), Some(&PathBuf::from("/opt/custom/ambuild")));
    }
}
