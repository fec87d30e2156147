use super::{ProfileFile, ProjectFile, ServiceFile, PROFILE_FILE, PROJECT_FILE, SERVICE_FILE};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Find the project file starting from `dir` and walking up to the filesystem root.
    pub fn find_project_file(&self, dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(PROJECT_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        dir.parent().and_then(|parent| self.find_project_file(parent))
    }

    /// Find every service file below `root`.
    ///
    /// Files directly in the root don't count, and the subtree of any nested
    /// directory holding its own project file belongs to that other project.
    /// The result is sorted so service loading is deterministic.
    pub fn find_service_files(&self, root: &Path) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir() && entry.path().join(PROJECT_FILE).is_file())
            });

        let mut found = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable path while scanning for services: {}", e);
                    continue;
                }
            };
            if entry.depth() >= 2
                && entry.file_type().is_file()
                && entry.file_name() == SERVICE_FILE
            {
                found.push(entry.into_path());
            }
        }

        found.sort();
        found
    }

    pub fn load_project_file(&self, path: &Path) -> Result<ProjectFile> {
        load_yaml(path)
    }

    pub fn load_service_file(&self, path: &Path) -> Result<ServiceFile> {
        load_yaml(path)
    }

    /// Load the profile from `profile_dir`, or `None` if the user has none.
    pub fn load_profile_file(&self, profile_dir: &Path) -> Result<Option<ProfileFile>> {
        let path = profile_dir.join(PROFILE_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        load_yaml(&path).map(Some)
    }

    /// Parse a config document; `path` only labels errors.
    pub fn parse_str<T>(&self, content: &str, path: &Path) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|source| Error::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            serde_yaml::Value::Null => Ok(T::default()),
            serde_yaml::Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|source| Error::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            other => Err(Error::config(
                path,
                format!("Expected a mapping, got {}", describe(&other)),
            )),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn load_yaml<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let content = fs::read_to_string(path)
        .map_err(|e| Error::config(path, format!("Failed to read file: {}", e)))?;
    tracing::debug!("Loading {}", path.display());
    Parser::new().parse_str(&content, path)
}

fn describe(value: &serde_yaml::Value) -> String {
    let kind = match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    };
    match serde_yaml::to_string(value) {
        Ok(text) => format!("{}: {}", kind, text.trim()),
        Err(_) => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_project_file() {
        let yaml = r#"
name: shop
default: backend
groups:
  backend:
    - api
    - db
"#;
        let parser = Parser::new();
        let project: ProjectFile = parser.parse_str(yaml, Path::new("adsroot.yml")).unwrap();

        assert_eq!(project.name.as_deref(), Some("shop"));
        assert_eq!(project.default.as_deref(), Some("backend"));
        assert_eq!(project.groups.unwrap()["backend"], vec!["api", "db"]);
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        let parser = Parser::new();
        let service: ServiceFile = parser.parse_str("", Path::new("ads.yml")).unwrap();
        assert!(service.status_cmd.is_none());
        assert!(service.log_paths.is_none());
    }

    #[test]
    fn test_non_mapping_document_rejected() {
        let parser = Parser::new();
        let err = parser
            .parse_str::<ServiceFile>("- just\n- a list\n", Path::new("svc/ads.yml"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("svc/ads.yml: Expected a mapping"), "{}", msg);
    }

    #[test]
    fn test_non_string_selector_rejected() {
        let yaml = r#"
groups:
  backend:
    - api
    - 42
"#;
        let parser = Parser::new();
        let err = parser
            .parse_str::<ProjectFile>(yaml, Path::new("adsroot.yml"))
            .unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }), "{:?}", err);
    }

    #[test]
    fn test_group_must_be_a_list() {
        let yaml = "groups:\n  backend: api\n";
        let parser = Parser::new();
        assert!(parser
            .parse_str::<ProjectFile>(yaml, Path::new("adsroot.yml"))
            .is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let parser = Parser::new();
        assert!(parser
            .parse_str::<ServiceFile>("start_command: run.sh\n", Path::new("ads.yml"))
            .is_err());
    }

    #[test]
    fn test_find_project_file_walks_up() {
        let temp = tempfile::tempdir().unwrap();
        write(&temp.path().join(PROJECT_FILE), "");
        let deep = temp.path().join("a/b/c");
        fs::create_dir_all(&deep).unwrap();

        let found = Parser::new().find_project_file(&deep).unwrap();
        assert_eq!(found, temp.path().join(PROJECT_FILE));
    }

    #[test]
    fn test_find_service_files_skips_root_and_nested_projects() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        write(&root.join(PROJECT_FILE), "");
        write(&root.join(SERVICE_FILE), "");
        write(&root.join("api/ads.yml"), "");
        write(&root.join("tools/worker/ads.yml"), "");
        write(&root.join("vendor/adsroot.yml"), "");
        write(&root.join("vendor/lib/ads.yml"), "");

        let files = Parser::new().find_service_files(root);
        assert_eq!(
            files,
            vec![root.join("api/ads.yml"), root.join("tools/worker/ads.yml")]
        );
    }

    #[test]
    fn test_missing_profile_is_none() {
        let temp = tempfile::tempdir().unwrap();
        assert!(Parser::new()
            .load_profile_file(temp.path())
            .unwrap()
            .is_none());
    }
}
