//! # ads
//!
//! A small orchestrator for the services in a local codebase.
//!
//! ads has no process model of its own. Each service describes itself in an
//! `ads.yml` with up to three shell commands (status, start, stop) and some
//! log globs; ads finds those files below an `adsroot.yml`, resolves what the
//! user asked for, and runs the commands.
//!
//! ## Features
//!
//! - **Selectors**: service names, nested groups from the project and the
//!   user's profile, and `all`, resolved with cycle detection
//! - **Idempotent lifecycle**: `up` and `down` check status first, and `down`
//!   keeps re-running the stop command until status agrees
//! - **Logs**: tail, list or cat each service's log globs
//!
//! ## Quick Start
//!
//! ```no_run
//! use ads::{LifecycleController, QuietOutput, ShellRunner, Workspace};
//!
//! # async fn example() -> Result<(), ads::Error> {
//! let workspace = Workspace::load_from_env()?;
//! let services = workspace.select(&["backend"], true)?;
//!
//! let runner = ShellRunner::new();
//! let controller = LifecycleController::new(&runner, &QuietOutput, false);
//! controller.up_all(&services).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod output;
pub mod paths;
pub mod project;
pub mod runner;
pub mod selector;
pub mod service;

// Re-export commonly used types
pub use config::Parser;
pub use error::{Error, Result};
pub use lifecycle::{LifecycleController, Outcome, ServiceStatus};
pub use output::{CliOutput, MemoryOutput, QuietOutput, UserOutput};
pub use project::{Profile, Project, Workspace};
pub use runner::{CommandOutcome, CommandRunner, OutputMode, ShellRunner};
pub use selector::{GroupTable, SelectorResolver, ServiceSet};
pub use service::{LogKind, Service, ServiceRegistry, Verb};
