//! Tree and file content endpoints.
//!
//! - GET /api/tree?branch=
//!   Full file tree. Current branch (or empty) shows the working copy,
//!   other branches their committed state.
//!   Used by: FileTree sidebar
//!
//! - GET /api/file/{*path}?branch=
//!   Raw file bytes with a Content-Type guessed from the extension.
//!   Used by: FileViewer, Editor

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::git::SharedProvider;
use crate::models::TreeNode;

pub fn routes(provider: SharedProvider) -> Router {
    Router::new()
        .route("/api/tree", get(get_tree))
        .route("/api/file/{*path}", get(get_file_content))
        .with_state(provider)
}

#[derive(Debug, Default, Deserialize)]
pub struct BranchQuery {
    #[serde(default)]
    pub branch: String,
}

pub async fn get_tree(
    State(provider): State<SharedProvider>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<TreeNode>> {
    let provider = provider.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let tree = provider.tree(&query.branch)?;
    Ok(Json(tree))
}

pub async fn get_file_content(
    State(provider): State<SharedProvider>,
    Path(path): Path<String>,
    Query(query): Query<BranchQuery>,
) -> Result<Response> {
    let provider = provider.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let content = provider.file_content(&path, &query.branch)?;
    let content_type = content_type_for(&path, &content);

    Ok(([(header::CONTENT_TYPE, content_type)], content).into_response())
}

/// Extension first, then a text/binary guess from the bytes.
fn content_type_for(path: &str, content: &[u8]) -> String {
    match mime_guess::from_path(path).first() {
        Some(mime) => mime.to_string(),
        None if std::str::from_utf8(content).is_ok() => "text/plain; charset=utf-8".to_string(),
        None => "application/octet-stream".to_string(),
    }
}
