use std::path::{Component, Path, PathBuf};

/// Express `path` relative to `base`, e.g. `/src/api` from `/src/web` is `../api`.
///
/// Both paths should be absolute. When they share no prefix (different
/// Windows drives) `path` is returned unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendant() {
        assert_eq!(
            relative_to(Path::new("/src/app/api"), Path::new("/src/app")),
            Path::new("api")
        );
    }

    #[test]
    fn test_sibling_and_ancestor() {
        assert_eq!(
            relative_to(Path::new("/src/app/api"), Path::new("/src/app/web/static")),
            Path::new("../../api")
        );
        assert_eq!(
            relative_to(Path::new("/src"), Path::new("/src/app/web")),
            Path::new("../..")
        );
    }

    #[test]
    fn test_same_directory_is_dot() {
        assert_eq!(relative_to(Path::new("/src/app"), Path::new("/src/app")), Path::new("."));
    }
}
