//! API route handlers - maps HTTP endpoints to provider operations.
//!
//! Each submodule defines routes for a feature area:
//! - `tree`: File tree and raw file content
//! - `branches`: Branch listing
//! - `status`: Working copy status (branch, dirty flag)
//! - `write`: Write, delete, move and move-folder
//! - `commit`: Snapshot commit of the working copy
//! - `search`: Filename and content search

pub mod branches;
pub mod commit;
pub mod search;
pub mod status;
pub mod tree;
pub mod write;

use axum::Router;

use crate::git::SharedProvider;

pub fn create_router(provider: SharedProvider) -> Router {
    Router::new()
        .merge(tree::routes(provider.clone()))
        .merge(branches::routes(provider.clone()))
        .merge(status::routes(provider.clone()))
        .merge(write::routes(provider.clone()))
        .merge(commit::routes(provider.clone()))
        .merge(search::routes(provider))
}
