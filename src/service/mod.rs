//! Services and the registry that holds them.
//!
//! A [`Service`] is just a name, a home directory and up to three shell
//! commands; ads has no built-in process model.
//!
//! # Example
//!
//! ```
//! use ads::service::{Service, Verb};
//!
//! let api = Service::new("api", "/src/api").with_status("pgrep -f api-server");
//! assert_eq!(api.command(Verb::Status), Some("pgrep -f api-server"));
//! assert_eq!(api.command(Verb::Start), None);
//! ```

mod logs;
mod registry;
mod types;

pub use logs::*;
pub use registry::*;
pub use types::*;
