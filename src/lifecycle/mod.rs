//! Driving services up and down through their own commands.
//!
//! A service's state is never stored: it is observed by running the status
//! command (exit 0 means running). [`LifecycleController`] turns that into
//! idempotent up/down operations and the batch forms used by the CLI.

mod batch;
mod controller;
mod outcome;

pub use controller::*;
pub use outcome::*;
