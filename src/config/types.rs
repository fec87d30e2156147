//! On-disk configuration formats.
//!
//! Three YAML files feed a run of ads:
//!
//! - `adsroot.yml` marks the project root ([`ProjectFile`])
//! - `ads.yml` sits in each service's home directory ([`ServiceFile`])
//! - `~/.ads_profile.yml` holds per-user overrides ([`ProfileFile`])

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name that marks the root of a project.
pub const PROJECT_FILE: &str = "adsroot.yml";

/// File name that defines a service; the service is named after its directory.
pub const SERVICE_FILE: &str = "ads.yml";

/// File name of the user profile, looked up in the profile home.
pub const PROFILE_FILE: &str = ".ads_profile.yml";

/// Group name → selectors, as written in a config file.
pub type GroupMap = BTreeMap<String, Vec<String>>;

/// Contents of `adsroot.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    /// Display name; defaults to the root directory's name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub groups: Option<GroupMap>,

    /// Selector used when a command is given no services
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Contents of an `ads.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Exits 0 iff the service is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_cmd: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cmd: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_cmd: Option<String>,

    /// Globs relative to the service home
    #[serde(default)]
    pub log_paths: Option<Vec<String>>,

    #[serde(default)]
    pub err_log_paths: Option<Vec<String>>,
}

/// Contents of `.ads_profile.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    #[serde(default)]
    pub groups: Option<GroupMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
