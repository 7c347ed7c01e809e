//! Working copy status endpoint.
//!
//! - GET /api/status
//!   Repository location, resolved branch and dirty flag.
//!   Used by: Header

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::git::SharedProvider;
use crate::models::RepoStatus;

pub fn routes(provider: SharedProvider) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .with_state(provider)
}

pub async fn get_status(State(provider): State<SharedProvider>) -> Result<Json<RepoStatus>> {
    let provider = provider.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let status = provider.status()?;
    Ok(Json(status))
}
