//! Loading a project, its services, and the user's profile from disk.
//!
//! The [`Workspace`] is what every CLI command starts from: the active
//! [`Project`] (found by walking up to `adsroot.yml`), the user's [`Profile`],
//! and the merged group namespace the two of them define.

mod listing;
mod workspace;

pub use listing::*;
pub use workspace::*;

use crate::config::{normalize_default, validate_groups, Parser, PROFILE_FILE, SERVICE_FILE};
use crate::error::{Error, Result};
use crate::selector::ServiceSet;
use crate::service::{Service, ServiceRegistry};
use std::path::{Path, PathBuf};

/// Environment variable naming the directory that holds `.ads_profile.yml`.
pub const PROFILE_HOME_ENV: &str = "ADS_PROFILE_HOME";

/// One `adsroot.yml` and the services below it.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    /// Directory containing `adsroot.yml`
    pub root: PathBuf,
    pub services: ServiceRegistry,
    pub groups: Vec<ServiceSet>,
    pub default_selector: Option<String>,
}

impl Project {
    /// Load the project whose marker file is `project_file`.
    ///
    /// Every `ads.yml` below the root becomes a service named after the
    /// directory that holds it.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is malformed, or two service directories
    /// share a name.
    pub fn load(project_file: &Path) -> Result<Self> {
        let parser = Parser::new();
        let root = project_file
            .parent()
            .ok_or_else(|| Error::Internal(format!("{} has no parent", project_file.display())))?
            .to_path_buf();

        let file = parser.load_project_file(project_file)?;
        let groups = file.groups.unwrap_or_default();
        validate_groups(&groups, project_file)?;

        let mut services = ServiceRegistry::new();
        for path in parser.find_service_files(&root) {
            let service = load_service(&parser, &path)?;
            services.insert(service, &path)?;
        }

        let name = file
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| dir_name(&root));

        tracing::debug!(
            project = %name,
            services = services.len(),
            groups = groups.len(),
            "Loaded project from {}",
            root.display()
        );

        Ok(Self {
            name,
            root,
            services,
            groups: ServiceSet::from_map(groups),
            default_selector: normalize_default(file.default),
        })
    }
}

/// The user's personal overlay of groups and default selector.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub groups: Vec<ServiceSet>,
    pub default_selector: Option<String>,
}

impl Profile {
    /// Load `.ads_profile.yml` from `dir`; a missing file is an empty profile.
    pub fn load(dir: &Path) -> Result<Self> {
        let Some(file) = Parser::new().load_profile_file(dir)? else {
            tracing::debug!("No profile in {}", dir.display());
            return Ok(Self::default());
        };

        let groups = file.groups.unwrap_or_default();
        validate_groups(&groups, &dir.join(PROFILE_FILE))?;

        Ok(Self {
            groups: ServiceSet::from_map(groups),
            default_selector: normalize_default(file.default),
        })
    }
}

fn load_service(parser: &Parser, path: &Path) -> Result<Service> {
    let home = path
        .parent()
        .ok_or_else(|| Error::Internal(format!("{} has no parent", path.display())))?;
    let file = parser.load_service_file(path)?;
    Ok(Service::from_file(dir_name(home), home, file))
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Path of a service's own config file.
pub fn service_file(service: &Service) -> PathBuf {
    service.home.join(SERVICE_FILE)
}
