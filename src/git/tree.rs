use git2::{ObjectType, StatusOptions, TreeWalkMode, TreeWalkResult};
use std::collections::{BTreeSet, HashMap};
use std::io::ErrorKind;
use std::time::Instant;
use walkdir::WalkDir;

use crate::error::Result;
use crate::git::paths::to_slash;
use crate::git::repository::{branch_tree, LocalProvider};
use crate::models::TreeNode;

impl LocalProvider {
    pub fn get_tree(&self, branch: &str) -> Result<TreeNode> {
        let start = Instant::now();
        let paths = if self.is_current_branch(branch) {
            self.working_tree_paths()?
        } else {
            self.committed_paths(branch)?
        };

        let file_count = paths.len();
        let tree = build_tree(paths);
        tracing::debug!(
            "Built tree for {}: {} files in {:?}",
            if branch.is_empty() { self.branch.as_str() } else { branch },
            file_count,
            start.elapsed()
        );
        Ok(tree)
    }

    /// Every visible file of the working copy: status entries (minus deletions)
    /// merged with a walk of the disk, both filtered through `.gitignore`.
    pub fn working_tree_paths(&self) -> Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();

        self.with_repo(|repo| {
            let mut opts = StatusOptions::new();
            opts.include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(false);

            for entry in repo.statuses(Some(&mut opts))?.iter() {
                let status = entry.status();
                if status.is_wt_deleted() || status.is_index_deleted() {
                    continue;
                }
                let Some(path) = entry.path() else {
                    continue;
                };
                if !self.ignore.is_ignored(path, false) {
                    files.insert(path.to_string());
                }
            }
            Ok(())
        })?;

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                    return false;
                };
                if relative == std::path::Path::new(".git") {
                    return false;
                }
                !self.ignore.is_ignored(relative, entry.file_type().is_dir())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Removed while we were walking
                Err(e) if e.io_error().map(|io| io.kind()) == Some(ErrorKind::NotFound) => continue,
                Err(e) => return Err(std::io::Error::from(e).into()),
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                files.insert(to_slash(relative));
            }
        }

        Ok(files)
    }

    /// Every blob in the branch's committed tree. No ignore filtering.
    pub fn committed_paths(&self, branch: &str) -> Result<BTreeSet<String>> {
        self.with_repo(|repo| {
            let tree = branch_tree(repo, branch)?;
            let mut files = BTreeSet::new();

            tree.walk(TreeWalkMode::PreOrder, |parent, entry| {
                if entry.kind() == Some(ObjectType::Blob) {
                    if let Some(name) = entry.name() {
                        files.insert(format!("{}{}", parent, name));
                    }
                }
                TreeWalkResult::Ok
            })?;

            Ok(files)
        })
    }
}

/// Intermediate node keyed by segment so inserts avoid scanning siblings.
#[derive(Default)]
struct PendingNode {
    is_dir: bool,
    children: HashMap<String, PendingNode>,
}

impl PendingNode {
    fn insert(&mut self, path: &str) {
        let mut current = self;
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();

        while let Some(segment) = segments.next() {
            let is_last = segments.peek().is_none();
            let child = current.children.entry(segment.to_string()).or_default();
            if !is_last {
                child.is_dir = true;
            }
            current = child;
        }
    }

    fn into_node(self, name: String, path: String) -> TreeNode {
        let mut children: Vec<TreeNode> = self
            .children
            .into_iter()
            .map(|(child_name, child)| {
                let child_path = if path.is_empty() {
                    child_name.clone()
                } else {
                    format!("{}/{}", path, child_name)
                };
                child.into_node(child_name, child_path)
            })
            .collect();

        children.sort_by(TreeNode::display_order);

        TreeNode {
            name,
            path,
            is_dir: self.is_dir,
            children,
        }
    }
}

/// Nests slash-separated file paths under a synthetic root, sorted for display.
pub fn build_tree<I, S>(paths: I) -> TreeNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = PendingNode {
        is_dir: true,
        ..Default::default()
    };
    for path in paths {
        root.insert(path.as_ref());
    }
    root.into_node(String::new(), String::new())
}
