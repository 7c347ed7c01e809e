use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::git::repository::LocalProvider;
use crate::models::{BranchInfo, RepoStatus, SearchResult, TreeNode};

/// Everything the HTTP layer needs from a repository.
///
/// `LocalProvider` serves a local working copy. An empty `branch` argument
/// always means the provider's own branch.
pub trait GitProvider: Send + Sync {
    /// Full file tree. The current branch includes uncommitted and untracked
    /// files; other branches show their committed state.
    fn tree(&self, branch: &str) -> Result<TreeNode>;

    fn file_content(&self, path: &str, branch: &str) -> Result<Vec<u8>>;

    fn branches(&self) -> Result<Vec<BranchInfo>>;

    fn status(&self) -> Result<RepoStatus>;

    /// Creates missing parent directories.
    fn write_file(&self, path: &str, content: &[u8]) -> Result<()>;

    fn delete_file(&self, path: &str) -> Result<()>;

    fn move_file(&self, old_path: &str, new_path: &str) -> Result<()>;

    fn move_folder(&self, old_path: &str, new_path: &str) -> Result<()>;

    /// Commits all staged and unstaged changes, returning the commit hash.
    fn commit(&self, message: &str) -> Result<String>;

    fn search_file_names(&self, query: &str) -> Result<Vec<String>>;

    fn search_content(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Handlers that mutate the working copy hold the write guard.
pub type SharedProvider = Arc<RwLock<dyn GitProvider>>;

impl GitProvider for LocalProvider {
    fn tree(&self, branch: &str) -> Result<TreeNode> {
        self.get_tree(branch)
    }

    fn file_content(&self, path: &str, branch: &str) -> Result<Vec<u8>> {
        self.get_file_content(path, branch)
    }

    fn branches(&self) -> Result<Vec<BranchInfo>> {
        self.list_branches()
    }

    fn status(&self) -> Result<RepoStatus> {
        self.get_status()
    }

    fn write_file(&self, path: &str, content: &[u8]) -> Result<()> {
        LocalProvider::write_file(self, path, content)
    }

    fn delete_file(&self, path: &str) -> Result<()> {
        LocalProvider::delete_file(self, path)
    }

    fn move_file(&self, old_path: &str, new_path: &str) -> Result<()> {
        LocalProvider::move_file(self, old_path, new_path)
    }

    fn move_folder(&self, old_path: &str, new_path: &str) -> Result<()> {
        LocalProvider::move_folder(self, old_path, new_path)
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.commit_all(message)
    }

    fn search_file_names(&self, query: &str) -> Result<Vec<String>> {
        LocalProvider::search_file_names(self, query)
    }

    fn search_content(&self, query: &str) -> Result<Vec<SearchResult>> {
        LocalProvider::search_content(self, query)
    }
}

pub fn shared(provider: LocalProvider) -> SharedProvider {
    Arc::new(RwLock::new(provider))
}
