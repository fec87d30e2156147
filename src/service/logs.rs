//! Log file discovery for services.
//!
//! Log paths in `ads.yml` are shell-style globs relative to the service home
//! (`*` does not cross `/`, `**` does).

use super::{LogKind, Service};
use crate::config::SERVICE_FILE;
use crate::error::{Error, Result};
use globset::GlobBuilder;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

impl Service {
    /// Existing files matching this service's log globs of `kind`, as absolute paths.
    pub fn resolve_logs(&self, kind: LogKind) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        for pattern in self.log_globs(kind) {
            let matches = expand_glob(&self.home, pattern).map_err(|message| {
                Error::config(self.home.join(SERVICE_FILE), message)
            })?;
            result.extend(matches);
        }
        Ok(result)
    }
}

/// Collect log files of `kind` across `services`, failing if there are none.
pub fn collect_logs_nonempty(services: &[&Service], kind: LogKind) -> Result<Vec<PathBuf>> {
    let mut all = Vec::new();
    for service in services {
        all.extend(service.resolve_logs(kind)?);
    }

    if all.is_empty() {
        let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
        return Err(Error::NotFound(format!(
            "No {} log files found for services [{}]",
            kind,
            names.join(", ")
        )));
    }

    Ok(all)
}

/// Expand one glob against `home`, returning matching files in sorted order.
fn expand_glob(home: &Path, pattern: &str) -> std::result::Result<Vec<PathBuf>, String> {
    let full = home.join(pattern);

    // Walk from the deepest directory that contains no glob syntax.
    let mut base = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in full.components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !text.contains(GLOB_META) {
            base.push(component);
        } else {
            if matches!(component, Component::ParentDir) {
                return Err(format!("'..' after a wildcard is not supported in '{}'", pattern));
            }
            rest.push(text.into_owned());
        }
    }

    if rest.is_empty() {
        return Ok(if full.is_file() { vec![full] } else { Vec::new() });
    }

    let remainder = rest.join("/");
    let matcher = GlobBuilder::new(&remainder)
        .literal_separator(true)
        .build()
        .map_err(|e| format!("Invalid log path '{}': {}", pattern, e))?
        .compile_matcher();

    let mut walker = WalkDir::new(&base).min_depth(1);
    if !remainder.contains("**") {
        walker = walker.max_depth(rest.len());
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(&base)
                .map(|relative| matcher.is_match(relative))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    found.sort();
    Ok(found)
}
