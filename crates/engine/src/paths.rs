// crates/engine/src/paths.rs
//! Path utilities
//!
//! Root validation for the walkers and the path arithmetic used when
//! resolving files referenced by a project descriptor.
//!
//! Descriptor files are written by a Windows IDE, so their relative paths may
//! use `\` as separator. [`descriptor_path`] accepts both separators on every
//! platform.

use crate::error::{EngineError, Result};
use std::path::{Component, Path, PathBuf};

/// Check that `root` names an existing directory.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if the path is empty
/// - [`EngineError::PathNotFound`] if nothing exists at the path
/// - [`EngineError::NotADirectory`] if the path is not a directory
pub fn validate_root(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(EngineError::InvalidInput(
            "directory is empty, set a directory before calling this function".into(),
        ));
    }
    if !root.exists() {
        return Err(EngineError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(EngineError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Convert a potentially relative path into an absolute one without resolving symlinks.
#[must_use]
pub fn logical_absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Remove `.` and `..` components without touching the filesystem.
///
/// `..` directly below the root is dropped; leading `..` of a relative path is kept.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Absolute, normalized form of `path` that does not require the target to exist.
///
/// The longest existing ancestor is canonicalized first (resolving symlinks),
/// then the remaining components are appended and normalized lexically. A
/// `..` after a symlinked directory therefore steps out of the link target.
#[must_use]
pub fn weakly_canonical(path: &Path) -> PathBuf {
    let absolute = logical_absolute(path);

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    loop {
        if let Ok(mut resolved) = existing.canonicalize() {
            resolved.extend(tail.iter().rev());
            return normalize_lexically(&resolved);
        }
        match existing.parent() {
            Some(parent) => {
                if let Some(last) = existing.components().next_back() {
                    tail.push(last);
                }
                existing = parent;
            }
            None => return normalize_lexically(&absolute),
        }
    }
}

/// `path` expressed relative to `base`; `"."` when both are the same directory.
///
/// Paths outside `base` are returned unchanged.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Native path for a path string taken from a descriptor.
#[must_use]
pub fn descriptor_path(raw: &str) -> PathBuf {
    let mut path = PathBuf::new();
    if raw.starts_with('/') {
        path.push("/");
    }
    for segment in raw.split(['\\', '/']).filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_root_errors() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(validate_root(temp.path()).is_ok());
        assert!(matches!(
            validate_root(Path::new("")),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_root(&temp.path().join("missing")),
            Err(EngineError::PathNotFound(_))
        ));
        assert!(matches!(
            validate_root(&file),
            Err(EngineError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(
            normalize_lexically(Path::new("../x/./y")),
            PathBuf::from("../x/y")
        );
        assert_eq!(normalize_lexically(Path::new("a/..")), PathBuf::new());
    }

    #[test]
    fn test_weakly_canonical_missing_tail() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        fs::create_dir(base.join("proj")).unwrap();

        let resolved = weakly_canonical(&base.join("proj").join(".").join("..").join("src/a.cpp"));
        assert_eq!(resolved, base.join("src").join("a.cpp"));
        assert!(resolved.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_weakly_canonical_resolves_links_before_parent_dir() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        fs::create_dir_all(base.join("other/dir")).unwrap();
        fs::create_dir(base.join("proj")).unwrap();
        fs::write(base.join("other/a.h"), "x\n").unwrap();
        std::os::unix::fs::symlink(base.join("other/dir"), base.join("proj/link")).unwrap();

        let resolved = weakly_canonical(&base.join("proj/link/../a.h"));
        assert_eq!(resolved, base.join("other").join("a.h"));
        assert!(resolved.is_file());

        let missing = weakly_canonical(&base.join("proj/link/../gone/./b.h"));
        assert_eq!(missing, base.join("other/gone/b.h"));
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/scan/root");
        assert_eq!(relative_to(Path::new("/scan/root"), base), PathBuf::from("."));
        assert_eq!(
            relative_to(Path::new("/scan/root/proj/lib"), base),
            PathBuf::from("proj/lib")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere"), base),
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn test_descriptor_path_accepts_both_separators() {
        assert_eq!(descriptor_path("src\\forms\\Main.cpp"), PathBuf::from("src/forms/Main.cpp"));
        assert_eq!(descriptor_path("src/Main.cpp"), PathBuf::from("src/Main.cpp"));
        assert_eq!(descriptor_path("..\\common\\util.h"), PathBuf::from("../common/util.h"));
    }
}
