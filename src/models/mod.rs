//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `tree`: TreeNode, BranchInfo, RepoStatus
//! - `search`: SearchResult for full-text matches

pub mod search;
pub mod tree;

pub use search::*;
pub use tree::*;
