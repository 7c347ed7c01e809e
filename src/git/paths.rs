//! Validation of repository-relative paths supplied by callers.
//!
//! Every read or mutation that takes an external path goes through
//! [`normalize_path`] before touching the working copy or the object store.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{AppError, Result};

/// Trims surrounding slashes and converts to forward slashes.
///
/// Rejects empty paths and anything containing `..` (a plain substring check,
/// so `a..b.txt` is rejected as well).
pub fn normalize_path(raw: &str) -> Result<String> {
    let slashed = if MAIN_SEPARATOR == '/' {
        raw.to_string()
    } else {
        raw.replace(MAIN_SEPARATOR, "/")
    };
    let path = slashed.trim_matches('/');

    if path.is_empty() {
        return Err(AppError::InvalidPath("path cannot be empty".to_string()));
    }
    if path.contains("..") {
        return Err(AppError::InvalidPath(format!("{} cannot contain '..'", path)));
    }

    Ok(path.to_string())
}

/// Joins a normalized slash path onto the working copy root.
pub fn working_path(root: &Path, path: &str) -> PathBuf {
    path.split('/').fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Slash-joined form of a path relative to the working copy root.
pub fn to_slash(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_leading_and_trailing_slashes() {
        assert_eq!(normalize_path("/docs/setup.md/").unwrap(), "docs/setup.md");
        assert_eq!(normalize_path("README.md").unwrap(), "README.md");
    }

    #[test]
    fn rejects_empty_paths() {
        assert!(matches!(normalize_path(""), Err(AppError::InvalidPath(_))));
        assert!(matches!(normalize_path("///"), Err(AppError::InvalidPath(_))));
    }

    #[test]
    fn rejects_any_dot_dot() {
        assert!(matches!(normalize_path("../etc/passwd"), Err(AppError::InvalidPath(_))));
        assert!(matches!(normalize_path("a/../../b"), Err(AppError::InvalidPath(_))));
        // Coarse check: a double dot inside a longer name is rejected too.
        assert!(matches!(normalize_path("a..b.txt"), Err(AppError::InvalidPath(_))));
    }

    #[test]
    fn working_path_and_to_slash_round_trip() {
        let root = Path::new("/repo");
        let full = working_path(root, "docs/guide/intro.md");
        assert_eq!(full, Path::new("/repo/docs/guide/intro.md"));
        assert_eq!(to_slash(full.strip_prefix(root).unwrap()), "docs/guide/intro.md");
    }
}
