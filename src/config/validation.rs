use super::GroupMap;
use crate::error::{Error, Result};
use std::path::Path;

/// Validate group definitions loaded from `origin`.
///
/// Group names and every selector in a group must be non-empty.
pub fn validate_groups(groups: &GroupMap, origin: &Path) -> Result<()> {
    for (name, selectors) in groups {
        if name.trim().is_empty() {
            return Err(Error::config(origin, "Group names cannot be empty"));
        }
        if name == "all" {
            tracing::warn!(
                "{}: group 'all' is never used; 'all' always means every service",
                origin.display()
            );
        }
        if let Some(position) = selectors.iter().position(|s| s.trim().is_empty()) {
            return Err(Error::config(
                origin,
                format!(
                    "Group '{}' has an empty selector at position {}",
                    name,
                    position + 1
                ),
            ));
        }
    }
    Ok(())
}

/// Normalize a `default:` entry; an empty string means "not set".
pub fn normalize_default(default: Option<String>) -> Option<String> {
    default.filter(|s| !s.trim().is_empty())
}
