//! Build context preparation and delegation to the orchestrator.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context as _, Result};
use log::{debug, info};
use serde::Serialize;

use crate::locate::Orchestrator;
use crate::options::OptionRegistry;
use crate::platform::{default_build_folder, TargetPlatform};

/// Destination key of the build-folder option, when a front-end registers
/// one. The context consults it before falling back to its own default.
pub const BUILD_FOLDER_DEST: &str = "build_folder";

/// A prepared build context: where the sources are, where output should go
/// by default, which options the project registered, and which orchestrator
/// will do the real work.
#[derive(Debug, Clone)]
pub struct BuildContext {
    source_path: PathBuf,
    platform: TargetPlatform,
    default_build_folder: String,
    options: OptionRegistry,
    orchestrator: Orchestrator,
}

/// Serializable snapshot of the exact orchestrator invocation
/// [`BuildContext::configure`] will run.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurePlan {
    pub orchestrator: Orchestrator,
    pub platform: TargetPlatform,
    pub source_path: PathBuf,
    pub build_folder: String,
    pub args: Vec<String>,
}

impl BuildContext {
    /// Prepare a context rooted at `source_path`, with the platform-derived
    /// `obj-<platform>` default build folder and an empty option registry.
    pub fn prepare(source_path: impl Into<PathBuf>, orchestrator: Orchestrator) -> Self {
        let platform = TargetPlatform::detect();
        Self {
            source_path: source_path.into(),
            platform,
            default_build_folder: default_build_folder(platform),
            options: OptionRegistry::new(),
            orchestrator,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn options(&self) -> &OptionRegistry {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionRegistry {
        &mut self.options
    }

    /// Override the platform-derived default build folder.
    pub fn set_default_build_folder(&mut self, folder: impl Into<String>) {
        self.default_build_folder = folder.into();
    }

    /// The effective build folder: the registry's `build_folder` value when
    /// one is resolved, otherwise the context default.
    pub fn build_folder(&self) -> &str {
        self.options
            .value(BUILD_FOLDER_DEST)
            .unwrap_or(&self.default_build_folder)
    }

    /// Snapshot the exact invocation [`configure`](Self::configure) would
    /// run. The argument list is `configure --source-path <src>
    /// --build-folder <folder>` followed by the registered options the user
    /// actually set, in registration order.
    pub fn plan(&self) -> ConfigurePlan {
        let mut args = vec![
            "configure".to_string(),
            "--source-path".to_string(),
            self.source_path.display().to_string(),
            "--build-folder".to_string(),
            self.build_folder().to_string(),
        ];
        args.extend(self.options.to_args_without(&[BUILD_FOLDER_DEST]));

        ConfigurePlan {
            orchestrator: self.orchestrator.clone(),
            platform: self.platform,
            source_path: self.source_path.clone(),
            build_folder: self.build_folder().to_string(),
            args,
        }
    }

    /// Spawn the orchestrator's configuration routine with inherited stdio
    /// and wait for it. Spawn failure is an error; a non-zero child status
    /// is reported as the status, since the orchestrator already told the
    /// user what went wrong.
    pub fn configure(&self) -> Result<ExitStatus> {
        let plan = self.plan();
        info!(
            "handing off to {}: {}",
            plan.orchestrator.path.display(),
            plan.args.join(" ")
        );

        let status = Command::new(&plan.orchestrator.path)
            .args(&plan.args)
            .current_dir(&plan.source_path)
            .status()
            .with_context(|| format!("spawning {}", plan.orchestrator.path.display()))?;

        debug!("orchestrator exited with {status}");
        Ok(status)
    }
}
