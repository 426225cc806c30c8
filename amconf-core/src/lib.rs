//! amconf-core: orchestrator location and configure planning.
//!
//! This crate is the engine behind the `amconf` front-end. A project that
//! builds with the AMBuild orchestrator needs three things from its
//! configure bootstrap: find a compatible orchestrator install (and say
//! something useful when there is none), describe the options the project
//! registers for its configure step, and turn all of that into the exact
//! process invocation that hands control over to the orchestrator.
//!
//! The pieces map onto modules directly:
//!
//! - [`locate`] resolves an orchestrator binary (explicit path, `AMBUILD`
//!   environment override, then a `PATH` scan) and enforces the major
//!   version this front-end is written against.
//! - [`version`] probes and parses the version a binary reports.
//! - [`platform`] detects the target platform identifier and derives the
//!   default `obj-<platform>` build folder from it.
//! - [`options`] is the registry of configure options (flag, destination
//!   key, default, help) and renders the canonical forwarded argument list.
//! - [`context`] ties the above into a prepared build context whose
//!   [`configure`](context::BuildContext::configure) call spawns the
//!   orchestrator and reports its exit status.
//! - [`output`] renders a [`ConfigurePlan`](context::ConfigurePlan) for
//!   humans or machines.
//!
//! ```rust,no_run
//! use amconf_core::context::BuildContext;
//! use amconf_core::locate::OrchestratorProbe;
//!
//! let orchestrator = OrchestratorProbe::new().locate()?;
//! let mut context = BuildContext::prepare("/path/to/project", orchestrator);
//! context
//!     .options_mut()
//!     .add_str("--sm-path", "sm_path", None, "Path to SourceMod")?;
//! let status = context.configure()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod locate;
pub mod options;
pub mod output;
pub mod platform;
pub mod version;
