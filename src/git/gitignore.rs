use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// Rules from the `.gitignore` at the working copy root.
///
/// Nested and global ignore files are not consulted. Patterns are evaluated in
/// file order, last match wins, and a path is also excluded when any of its
/// parent directories is.
pub struct IgnoreMatcher {
    matcher: Gitignore,
}

impl IgnoreMatcher {
    /// Reads `<root>/.gitignore`; a missing file yields a matcher that ignores nothing.
    pub fn load(root: &Path) -> Result<Self> {
        match fs::read(root.join(".gitignore")) {
            Ok(bytes) => Ok(Self::parse(root, &String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self {
                matcher: Gitignore::empty(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(root: &Path, contents: &str) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Err(e) = builder.add_line(None, line) {
                tracing::warn!("Skipping .gitignore pattern {:?}: {}", line, e);
            }
        }

        let matcher = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Failed to compile .gitignore: {}", e);
            Gitignore::empty()
        });

        Self { matcher }
    }

    /// `path` is relative to the working copy root.
    pub fn is_ignored<P: AsRef<Path>>(&self, path: P, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(contents: &str) -> IgnoreMatcher {
        IgnoreMatcher::parse(Path::new("/repo"), contents)
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let m = matcher("# build output\n\n   \n*.log\n");
        assert!(m.is_ignored("debug.log", false));
        assert!(m.is_ignored("nested/dir/trace.log", false));
        assert!(!m.is_ignored("# build output", false));
        assert!(!m.is_ignored("notes.md", false));
    }

    #[test]
    fn directory_only_patterns_need_a_directory() {
        let m = matcher("build/\n");
        assert!(m.is_ignored("build", true));
        assert!(!m.is_ignored("build", false));
        assert!(m.is_ignored("build/out.js", false));
        assert!(m.is_ignored("build/nested/deep.js", false));
    }

    #[test]
    fn last_matching_pattern_wins() {
        let m = matcher("*.txt\n!keep.txt\n");
        assert!(m.is_ignored("drop.txt", false));
        assert!(!m.is_ignored("keep.txt", false));

        let m = matcher("!keep.txt\n*.txt\n");
        assert!(m.is_ignored("keep.txt", false));
    }

    #[test]
    fn double_star_matches_any_depth() {
        let m = matcher("docs/**/draft.md\n");
        assert!(m.is_ignored("docs/draft.md", false));
        assert!(m.is_ignored("docs/a/b/draft.md", false));
        assert!(!m.is_ignored("src/draft.md", false));
    }

    #[test]
    fn missing_ignore_file_ignores_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let m = IgnoreMatcher::load(dir.path()).unwrap();
        assert!(!m.is_ignored("anything.log", false));
    }
}
