//! Selector resolution.
//!
//! A selector is a service name, a group name, or `"all"`. Groups may name
//! other groups, across the project and profile scopes, so resolution is a
//! recursive set union guarded against cycles by a [`ResolutionStack`].
//!
//! ```
//! use ads::selector::{GroupTable, SelectorResolver, ServiceSet};
//! use ads::service::{Service, ServiceRegistry};
//! use std::path::Path;
//!
//! let services = ServiceRegistry::from_services(
//!     ["a", "b", "d"].map(|n| Service::new(n, format!("/src/{}", n))),
//!     Path::new("adsroot.yml"),
//! )?;
//! let groups = GroupTable::layered(
//!     &[ServiceSet::new("team", ["ab", "d"])],
//!     &[ServiceSet::new("ab", ["a", "b"])],
//! );
//! let names = SelectorResolver::new(&services, &groups).resolve("team")?;
//! assert_eq!(names.into_iter().collect::<Vec<_>>(), ["a", "b", "d"]);
//! # Ok::<(), ads::Error>(())
//! ```

mod groups;
mod resolver;
mod stack;

pub use groups::*;
pub use resolver::*;
pub use stack::*;
