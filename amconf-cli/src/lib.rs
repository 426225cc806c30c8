//! amconf CLI: the configure bootstrap for this extension project.

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use log::debug;

use amconf_core::context::{BuildContext, BUILD_FOLDER_DEST};
use amconf_core::locate::OrchestratorProbe;
use amconf_core::options::OptionRegistry;
use amconf_core::output::{write_plan_json, write_plan_text};
use amconf_core::platform::{default_build_folder, TargetPlatform};

/// CLI entrypoint for amconf.
#[derive(Debug, Parser)]
#[command(
    name = "amconf",
    about = "Configure an AMBuild extension project build"
)]
pub struct Cli {
    /// Path to SourceMod
    #[arg(long = "sm-path", value_hint = ValueHint::DirPath)]
    sm_path: Option<PathBuf>,

    /// Enable debugging symbols
    #[arg(long = "enable-debug", action = ArgAction::SetTrue)]
    enable_debug: bool,

    /// Enable optimization
    #[arg(long = "enable-optimize", action = ArgAction::SetTrue)]
    enable_optimize: bool,

    /// Build output folder (defaults to obj-<platform>)
    #[arg(long = "build-folder", value_hint = ValueHint::Other)]
    build_folder: Option<String>,

    /// Source tree to configure (defaults to the current directory)
    #[arg(long = "source-path", value_hint = ValueHint::DirPath)]
    source_path: Option<PathBuf>,

    /// Explicit path to the AMBuild binary
    #[arg(long = "ambuild-path", value_hint = ValueHint::FilePath)]
    ambuild_path: Option<PathBuf>,

    /// Print the configure invocation instead of running it
    #[arg(long = "show-plan", action = ArgAction::SetTrue)]
    show_plan: bool,

    /// Emit --show-plan output as JSON
    #[arg(long = "json", action = ArgAction::SetTrue, requires = "show_plan")]
    json: bool,
}

/// Parse CLI args, resolve the orchestrator, and run (or print) the
/// configure step. Returns the process exit code.
pub fn run() -> Result<i32> {
    init_logging();
    let cli = Cli::parse();
    run_with(cli)
}

fn run_with(cli: Cli) -> Result<i32> {
    let mut probe = OrchestratorProbe::new();
    if let Some(path) = &cli.ambuild_path {
        probe = probe.explicit_path(path);
    }
    let orchestrator = probe.locate()?;

    let source_path = match &cli.source_path {
        Some(path) => path.clone(),
        None => env::current_dir().context("resolving the current directory")?,
    };

    let mut context = BuildContext::prepare(source_path, orchestrator);
    debug!(
        "configuring {} with AMBuild {}",
        context.source_path().display(),
        context.orchestrator().version
    );
    register_options(context.options_mut())?;
    apply_options(&cli, context.options_mut())?;

    if cli.show_plan {
        let plan = context.plan();
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if cli.json {
            write_plan_json(&plan, &mut handle)?;
        } else {
            write_plan_text(&plan, &mut handle)?;
        }
        return Ok(0);
    }

    let status = context.configure()?;
    Ok(status.code().unwrap_or(1))
}

/// Register this project's configure options with the context registry.
fn register_options(options: &mut OptionRegistry) -> Result<()> {
    let default_folder = default_build_folder(TargetPlatform::detect());
    options.add_str(
        "--build-folder",
        BUILD_FOLDER_DEST,
        Some(&default_folder),
        "Build output folder",
    )?;
    options.add_str("--sm-path", "sm_path", None, "Path to SourceMod")?;
    options.add_const("--enable-debug", "debug", "1", "Enable debugging symbols")?;
    options.add_const("--enable-optimize", "opt", "1", "Enable optimization")?;
    Ok(())
}

/// Resolve parsed flags into the registry.
fn apply_options(cli: &Cli, options: &mut OptionRegistry) -> Result<()> {
    if let Some(folder) = &cli.build_folder {
        options.set(BUILD_FOLDER_DEST, folder.as_str())?;
    }
    if let Some(sm_path) = &cli.sm_path {
        options.set("sm_path", sm_path.display().to_string())?;
    }
    if cli.enable_debug {
        options.enable("debug")?;
    }
    if cli.enable_optimize {
        options.enable("opt")?;
    }
    Ok(())
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("AMCONF_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
