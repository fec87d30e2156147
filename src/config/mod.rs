//! Configuration loading.
//!
//! - `types` - on-disk formats (`ProjectFile`, `ServiceFile`, `ProfileFile`)
//! - `parser` - project discovery and YAML parsing
//! - `validation` - checks serde can't express

mod parser;
mod types;
mod validation;

pub use parser::*;
pub use types::*;
pub use validation::*;
