//! Tree and repository-related DTOs.
//!
//! - `TreeNode`: Recursive file/directory node (FileTree sidebar)
//! - `BranchInfo`: Local branch, flagged if it is the provider's branch
//! - `RepoStatus`: Working copy location, branch and dirty flag (header display)

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Directories first, then case-insensitive by name.
    pub fn display_order(a: &TreeNode, b: &TreeNode) -> Ordering {
        match (a.is_dir, b.is_dir) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }

    /// File paths in display order (depth-first, directories before files).
    pub fn file_paths(&self) -> Vec<String> {
        fn collect(node: &TreeNode, out: &mut Vec<String>) {
            if !node.is_dir {
                out.push(node.path.clone());
                return;
            }
            for child in &node.children {
                collect(child, out);
            }
        }

        let mut paths = Vec::new();
        collect(self, &mut paths);
        paths
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStatus {
    /// Absolute path of the working copy
    pub source: String,
    /// Resolved branch name, or `HEAD` when detached
    pub branch: String,
    pub is_dirty: bool,
}
