//! Commit endpoint.
//!
//! POST /api/commit { message: string }
//!
//! Stages every change in the working copy and commits it.
//! Returns `{ hash }` of the new commit.
//!
//! Used by: CommitDialog in PendingChanges

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::git::SharedProvider;

pub fn routes(provider: SharedProvider) -> Router {
    Router::new()
        .route("/api/commit", post(create_commit))
        .with_state(provider)
}

#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CommitResponse {
    pub hash: String,
}

pub async fn create_commit(
    State(provider): State<SharedProvider>,
    Json(request): Json<CommitRequest>,
) -> Result<Json<CommitResponse>> {
    let provider = provider.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let hash = provider.commit(&request.message)?;
    Ok(Json(CommitResponse { hash }))
}
