//! Target platform identification and derived build defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform identifier, in the vocabulary the orchestrator's own environment
/// detection reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Windows,
    Mac,
    Linux,
    FreeBsd,
    OpenBsd,
    NetBsd,
    Solaris,
}

impl TargetPlatform {
    /// Detect the host target platform. Unixes without their own identifier
    /// fall back to `Linux`.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "freebsd") {
            Self::FreeBsd
        } else if cfg!(target_os = "openbsd") {
            Self::OpenBsd
        } else if cfg!(target_os = "netbsd") {
            Self::NetBsd
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Self::Solaris
        } else {
            Self::Linux
        }
    }

    /// The lowercase identifier string.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::OpenBsd => "openbsd",
            Self::NetBsd => "netbsd",
            Self::Solaris => "solaris",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Default build output folder for a platform: the `obj-` prefix plus the
/// platform identifier.
pub fn default_build_folder(platform: TargetPlatform) -> String {
    format!("obj-{}", platform.identifier())
}
