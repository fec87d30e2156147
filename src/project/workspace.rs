use super::{Profile, Project, PROFILE_HOME_ENV};
use crate::config::Parser;
use crate::error::{Error, Result};
use crate::selector::{GroupTable, SelectorResolver, ALL_SELECTOR};
use crate::service::Service;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Placeholder selector standing for the effective default.
pub const DEFAULT_SELECTOR: &str = "default";

/// A loaded project plus the profile overlaying it.
#[derive(Debug, Clone)]
pub struct Workspace {
    project: Project,
    profile: Profile,
    groups: GroupTable,
}

impl Workspace {
    pub fn new(project: Project, profile: Profile) -> Self {
        let groups = GroupTable::layered(&project.groups, &profile.groups);
        Self {
            project,
            profile,
            groups,
        }
    }

    /// Find the project enclosing `cwd` and load it with the profile in `profile_dir`.
    pub fn load(cwd: &Path, profile_dir: Option<&Path>) -> Result<Self> {
        let project_file = Parser::new().find_project_file(cwd).ok_or_else(|| {
            Error::Usage("ads must be run from within an ads project".to_string())
        })?;
        let project = Project::load(&project_file)?;

        let profile = match profile_dir {
            Some(dir) => Profile::load(dir)?,
            None => {
                tracing::warn!("No home directory found; ignoring the ads profile");
                Profile::default()
            }
        };

        Ok(Self::new(project, profile))
    }

    /// Load from the current directory, with the profile from
    /// `$ADS_PROFILE_HOME` or the user's home directory.
    pub fn load_from_env() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd, profile_home().as_deref())
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    pub fn resolver(&self) -> SelectorResolver<'_> {
        SelectorResolver::new(&self.project.services, &self.groups)
    }

    /// Profile default, else project default, else `"all"`.
    pub fn default_selector(&self) -> &str {
        self.profile
            .default_selector
            .as_deref()
            .or(self.project.default_selector.as_deref())
            .unwrap_or(ALL_SELECTOR)
    }

    /// Resolve one user-supplied selector; `"default"` means the effective default.
    pub fn resolve(&self, selector: &str) -> Result<BTreeSet<String>> {
        self.resolver().resolve(self.expand_default(selector))
    }

    /// Resolve a command line's selectors (none means `"default"`) and union them.
    pub fn resolve_all<S: AsRef<str>>(&self, selectors: &[S]) -> Result<BTreeSet<String>> {
        let selectors: Vec<&str> = if selectors.is_empty() {
            vec![self.default_selector()]
        } else {
            selectors
                .iter()
                .map(|s| self.expand_default(s.as_ref()))
                .collect()
        };
        self.resolver().resolve_many(&selectors)
    }

    fn expand_default<'s>(&'s self, selector: &'s str) -> &'s str {
        if selector == DEFAULT_SELECTOR {
            self.default_selector()
        } else {
            selector
        }
    }

    /// The services a command should act on, sorted by name.
    ///
    /// With `require_match`, an empty result is a [`Error::NotFound`].
    pub fn select<S: AsRef<str>>(
        &self,
        selectors: &[S],
        require_match: bool,
    ) -> Result<Vec<&Service>> {
        let names = self.resolve_all(selectors)?;
        if require_match && names.is_empty() {
            let wanted: Vec<&str> = if selectors.is_empty() {
                vec![DEFAULT_SELECTOR]
            } else {
                selectors.iter().map(|s| s.as_ref()).collect()
            };
            return Err(Error::NotFound(format!(
                "No services found that match '{}'",
                wanted.join(" ")
            )));
        }

        names
            .iter()
            .map(|name| {
                self.project.services.get(name).ok_or_else(|| {
                    Error::Internal(format!("Resolved unknown service '{}'", name))
                })
            })
            .collect()
    }
}

/// Directory holding the user's profile file.
pub fn profile_home() -> Option<PathBuf> {
    match std::env::var_os(PROFILE_HOME_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir(),
    }
}
