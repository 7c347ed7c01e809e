use git2::{BranchType, ErrorCode, Repository, StatusOptions, Tree};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::git::gitignore::IgnoreMatcher;
use crate::models::{BranchInfo, RepoStatus};

/// Branch marker used when HEAD points directly at a commit.
pub const DETACHED_HEAD: &str = "HEAD";

/// A local working copy plus its object database.
///
/// The current branch is read from disk (uncommitted and untracked changes
/// included); every other branch is read from its committed tree.
pub struct LocalProvider {
    pub repo: Mutex<Repository>,
    pub root: PathBuf,
    pub branch: String,
    pub ignore: IgnoreMatcher,
}

impl LocalProvider {
    pub fn open<P: AsRef<Path>>(path: P, branch: Option<&str>) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::open(&path)
            .map_err(|_| AppError::NotAGitRepository(path_str.clone()))?;
        // Only the working directory itself is servable, never the git dir.
        let Some(workdir) = repo.workdir() else {
            return Err(AppError::NotAGitRepository(path_str));
        };
        let root = std::fs::canonicalize(workdir)?;
        if std::fs::canonicalize(&path)? != root {
            return Err(AppError::NotAGitRepository(path_str));
        }

        let branch = match branch.filter(|b| !b.is_empty()) {
            Some(name) => {
                repo.find_branch(name, BranchType::Local)
                    .map_err(|_| AppError::BranchNotFound(name.to_string()))?;
                name.to_string()
            }
            None => resolve_head(&repo)?,
        };

        let ignore = IgnoreMatcher::load(&root)?;

        tracing::info!("Opened {} on branch {}", root.display(), branch);

        Ok(Self {
            repo: Mutex::new(repo),
            root,
            branch,
            ignore,
        })
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }

    /// Empty means the provider's own branch.
    pub fn is_current_branch(&self, branch: &str) -> bool {
        branch.is_empty() || branch == self.branch
    }

    pub fn list_branches(&self) -> Result<Vec<BranchInfo>> {
        self.with_repo(|repo| {
            let mut branches = Vec::new();

            for entry in repo.branches(Some(BranchType::Local))? {
                let (branch, _) = entry?;
                let Some(name) = branch.name()? else {
                    continue;
                };

                branches.push(BranchInfo {
                    name: name.to_string(),
                    is_default: name == self.branch,
                });
            }

            branches.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(branches)
        })
    }

    pub fn get_status(&self) -> Result<RepoStatus> {
        self.with_repo(|repo| {
            let mut opts = StatusOptions::new();
            opts.include_untracked(true).include_ignored(false);
            let statuses = repo.statuses(Some(&mut opts))?;

            Ok(RepoStatus {
                source: self.root.to_string_lossy().to_string(),
                branch: self.branch.clone(),
                is_dirty: !statuses.is_empty(),
            })
        })
    }
}

/// Committed tree at the tip of a local branch.
pub fn branch_tree<'r>(repo: &'r Repository, branch: &str) -> Result<Tree<'r>> {
    let branch_ref = repo
        .find_branch(branch, BranchType::Local)
        .map_err(|_| AppError::BranchNotFound(branch.to_string()))?;
    Ok(branch_ref.get().peel_to_tree()?)
}

/// Short name of the checked-out branch, [`DETACHED_HEAD`] when detached.
///
/// An unborn branch (no commits yet) resolves to the name HEAD points at.
fn resolve_head(repo: &Repository) -> Result<String> {
    match repo.head() {
        Ok(head) if head.is_branch() => Ok(head.shorthand().unwrap_or(DETACHED_HEAD).to_string()),
        Ok(_) => Ok(DETACHED_HEAD.to_string()),
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            let target = head.symbolic_target().unwrap_or(DETACHED_HEAD);
            Ok(target.trim_start_matches("refs/heads/").to_string())
        }
        Err(e) => Err(e.into()),
    }
}
