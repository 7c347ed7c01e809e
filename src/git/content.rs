use git2::ErrorCode;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::paths::{normalize_path, working_path};
use crate::git::repository::{branch_tree, LocalProvider};

impl LocalProvider {
    /// Raw bytes of a file: from disk on the current branch, from the
    /// committed blob on any other branch.
    pub fn get_file_content(&self, path: &str, branch: &str) -> Result<Vec<u8>> {
        let path = normalize_path(path)?;

        if self.is_current_branch(branch) {
            self.read_working_file(&path)
        } else {
            self.read_committed_file(&path, branch)
        }
    }

    fn read_working_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = working_path(&self.root, path);

        let metadata = fs::metadata(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::FileNotFound(path.to_string()),
            _ => e.into(),
        })?;
        if metadata.is_dir() {
            return Err(AppError::NotAFile(path.to_string()));
        }

        Ok(fs::read(&full_path)?)
    }

    fn read_committed_file(&self, path: &str, branch: &str) -> Result<Vec<u8>> {
        self.with_repo(|repo| {
            let tree = branch_tree(repo, branch)?;

            let entry = tree.get_path(Path::new(path)).map_err(|e| match e.code() {
                ErrorCode::NotFound => AppError::FileNotFound(path.to_string()),
                _ => e.into(),
            })?;

            let obj = entry.to_object(repo)?;
            let blob = obj
                .as_blob()
                .ok_or_else(|| AppError::NotAFile(path.to_string()))?;

            Ok(blob.content().to_vec())
        })
    }
}
