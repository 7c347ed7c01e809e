//! Working copy mutations and snapshot commits.
//!
//! All paths are validated with [`normalize_path`] first. Writes only touch the
//! working copy; `commit_all` stages everything (new, modified and deleted
//! files) and records a commit on HEAD.

use git2::{ErrorCode, IndexAddOption, Signature, Time};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::paths::{normalize_path, working_path};
use crate::git::repository::LocalProvider;

pub const COMMIT_AUTHOR_NAME: &str = "Giki User";
pub const COMMIT_AUTHOR_EMAIL: &str = "user@giki.local";

impl LocalProvider {
    pub fn write_file(&self, path: &str, content: &[u8]) -> Result<()> {
        let path = normalize_path(path)?;
        let full_path = working_path(&self.root, &path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;

        tracing::info!("Wrote {} ({} bytes)", path, content.len());
        Ok(())
    }

    pub fn delete_file(&self, path: &str) -> Result<()> {
        let path = normalize_path(path)?;
        let full_path = working_path(&self.root, &path);

        if stat(&full_path, &path)?.is_dir() {
            return Err(AppError::NotAFile(path));
        }
        fs::remove_file(&full_path)?;

        tracing::info!("Deleted {}", path);
        Ok(())
    }

    pub fn move_file(&self, old_path: &str, new_path: &str) -> Result<()> {
        let old_path = normalize_path(old_path)?;
        let new_path = normalize_path(new_path)?;
        let old_full = working_path(&self.root, &old_path);
        let new_full = working_path(&self.root, &new_path);

        if stat(&old_full, &old_path)?.is_dir() {
            return Err(AppError::NotAFile(old_path));
        }
        rename_into_place(&old_full, &new_full, &new_path)?;

        tracing::info!("Moved {} -> {}", old_path, new_path);
        Ok(())
    }

    /// Renames a whole directory subtree in one step.
    pub fn move_folder(&self, old_path: &str, new_path: &str) -> Result<()> {
        let old_path = normalize_path(old_path)?;
        let new_path = normalize_path(new_path)?;

        if new_path.starts_with(&format!("{}/", old_path)) {
            return Err(AppError::SelfContainment {
                from: old_path,
                to: new_path,
            });
        }

        let old_full = working_path(&self.root, &old_path);
        let new_full = working_path(&self.root, &new_path);

        if !stat(&old_full, &old_path)?.is_dir() {
            return Err(AppError::NotADirectory(old_path));
        }
        rename_into_place(&old_full, &new_full, &new_path)?;

        tracing::info!("Moved folder {} -> {}", old_path, new_path);
        Ok(())
    }

    /// Stages every change in the working copy and commits it. Returns the hex id.
    pub fn commit_all(&self, message: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        self.with_repo(|repo| {
            let mut index = repo.index()?;
            index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
            // add_all never drops entries whose files are gone
            index.update_all(["*"].iter(), None)?;
            index.write()?;

            let tree_oid = index.write_tree()?;
            let tree = repo.find_tree(tree_oid)?;

            let when = Time::new(chrono::Utc::now().timestamp(), 0);
            let sig = Signature::new(COMMIT_AUTHOR_NAME, COMMIT_AUTHOR_EMAIL, &when)?;

            let parent = match repo.head() {
                Ok(head) => Some(head.peel_to_commit()?),
                Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
                Err(e) => return Err(e.into()),
            };
            let parents: Vec<&git2::Commit> = parent.iter().collect();

            let oid = repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

            tracing::info!("Committed {} on {}", oid, self.branch);
            Ok(oid.to_string())
        })
    }
}

/// Metadata of an existing path; a missing path is `FileNotFound`.
fn stat(full_path: &Path, path: &str) -> Result<fs::Metadata> {
    fs::metadata(full_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::FileNotFound(path.to_string()),
        _ => e.into(),
    })
}

fn rename_into_place(from: &Path, to: &Path, to_display: &str) -> Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(AppError::DestinationExists(to_display.to_string()));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(from, to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::{provider_with, write};

    #[test]
    fn write_creates_parents_and_round_trips() {
        let (_dir, provider) = provider_with(&[("README.md", "x")]);
        let bytes = b"line one\nline two\n\x00binary tail";

        provider.write_file("a/b.txt", bytes).unwrap();
        assert_eq!(provider.get_file_content("a/b.txt", "").unwrap(), bytes);

        provider.write_file("/a/b.txt", b"overwritten").unwrap();
        assert_eq!(provider.get_file_content("a/b.txt", "").unwrap(), b"overwritten");
    }

    #[test]
    fn write_rejects_unsafe_paths() {
        let (_dir, provider) = provider_with(&[("README.md", "x")]);
        assert!(matches!(provider.write_file("../escape.txt", b"x"), Err(AppError::InvalidPath(_))));
        assert!(matches!(provider.write_file("/", b"x"), Err(AppError::InvalidPath(_))));
    }

    #[test]
    fn delete_checks_target() {
        let (dir, provider) = provider_with(&[("docs/setup.md", "x"), ("README.md", "y")]);

        assert!(matches!(provider.delete_file("nope.md"), Err(AppError::FileNotFound(_))));
        assert!(matches!(provider.delete_file("docs"), Err(AppError::NotAFile(_))));

        provider.delete_file("README.md").unwrap();
        assert!(!dir.path().join("README.md").exists());
    }

    #[test]
    fn move_file_renames_and_creates_parents() {
        let (dir, provider) = provider_with(&[("draft.md", "body"), ("taken.md", "other")]);

        assert!(matches!(provider.move_file("ghost.md", "x.md"), Err(AppError::FileNotFound(_))));
        assert!(matches!(
            provider.move_file("draft.md", "taken.md"),
            Err(AppError::DestinationExists(_))
        ));

        provider.move_file("draft.md", "posts/2024/final.md").unwrap();
        assert!(!dir.path().join("draft.md").exists());
        assert_eq!(provider.get_file_content("posts/2024/final.md", "").unwrap(), b"body");
    }

    #[test]
    fn move_file_rejects_directories() {
        let (_dir, provider) = provider_with(&[("docs/setup.md", "x")]);
        assert!(matches!(provider.move_file("docs", "manual"), Err(AppError::NotAFile(_))));
    }

    #[test]
    fn move_folder_moves_whole_subtree() {
        let (dir, provider) = provider_with(&[("a/one.md", "1"), ("a/nested/two.md", "2")]);

        provider.move_folder("a", "archive/a").unwrap();
        assert!(!dir.path().join("a").exists());
        assert_eq!(provider.get_file_content("archive/a/nested/two.md", "").unwrap(), b"2");
        assert_eq!(provider.get_file_content("archive/a/one.md", "").unwrap(), b"1");
    }

    #[test]
    fn move_folder_preconditions() {
        let (dir, provider) = provider_with(&[("a/one.md", "1"), ("b/two.md", "2"), ("file.md", "3")]);

        assert!(matches!(provider.move_folder("a", "a/b"), Err(AppError::SelfContainment { .. })));
        assert!(matches!(provider.move_folder("a", "b"), Err(AppError::DestinationExists(_))));
        assert!(matches!(provider.move_folder("missing", "c"), Err(AppError::FileNotFound(_))));
        assert!(matches!(provider.move_folder("file.md", "c"), Err(AppError::NotADirectory(_))));
        // Sibling sharing a prefix is not containment.
        provider.move_folder("a", "ab").unwrap();
        assert!(dir.path().join("ab/one.md").exists());
    }

    #[test]
    fn commit_requires_message() {
        let (_dir, provider) = provider_with(&[("README.md", "x")]);
        assert!(matches!(provider.commit_all("   \n"), Err(AppError::EmptyMessage)));
    }

    #[test]
    fn commit_snapshots_everything() {
        let (dir, provider) = provider_with(&[("README.md", "x"), ("old.md", "y")]);
        write(dir.path(), "README.md", "changed");
        write(dir.path(), "new/file.md", "added");
        std::fs::remove_file(dir.path().join("old.md")).unwrap();
        assert!(provider.get_status().unwrap().is_dirty);

        let hash = provider.commit_all("  msg  ").unwrap();
        assert_eq!(hash.len(), 40);
        assert!(!provider.get_status().unwrap().is_dirty);

        provider
            .with_repo(|repo| {
                let commit = repo.find_commit(git2::Oid::from_str(&hash)?)?;
                assert_eq!(commit.message(), Some("msg"));
                assert_eq!(commit.author().name(), Some(COMMIT_AUTHOR_NAME));
                assert_eq!(commit.author().email(), Some(COMMIT_AUTHOR_EMAIL));

                let tree = commit.tree()?;
                assert!(tree.get_path(Path::new("new/file.md")).is_ok());
                assert!(tree.get_path(Path::new("old.md")).is_err());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn commit_on_unborn_branch_creates_root_commit() {
        let (dir, _repo) = crate::git::test_support::init_repo();
        write(dir.path(), "first.md", "hello");
        let provider = LocalProvider::open(dir.path(), None).unwrap();

        let hash = provider.commit_all("first").unwrap();
        provider
            .with_repo(|repo| {
                let head = repo.head()?.peel_to_commit()?;
                assert_eq!(head.id().to_string(), hash);
                assert_eq!(head.parent_count(), 0);
                Ok(())
            })
            .unwrap();
    }
}
