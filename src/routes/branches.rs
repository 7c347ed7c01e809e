//! Branch listing endpoint.
//!
//! - GET /api/branches
//!   Lists local branches; the provider's branch is flagged `isDefault`.
//!   Used by: BranchSelector dropdown in the top bar

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::git::SharedProvider;
use crate::models::BranchInfo;

pub fn routes(provider: SharedProvider) -> Router {
    Router::new()
        .route("/api/branches", get(list_branches))
        .with_state(provider)
}

pub async fn list_branches(State(provider): State<SharedProvider>) -> Result<Json<Vec<BranchInfo>>> {
    let provider = provider.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let branches = provider.branches()?;
    Ok(Json(branches))
}
