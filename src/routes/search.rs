//! Search endpoint.
//!
//! GET /api/search?q=<query>&type=filename|content
//!
//! - `filename`: fuzzy-ranked file paths
//! - `content`: matching lines with one line of context either side
//!
//! Both return at most 50 entries. Used by: SearchPanel

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::git::SharedProvider;

pub fn routes(provider: SharedProvider) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .with_state(provider)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type", default)]
    pub search_type: String,
}

pub async fn search(
    State(provider): State<SharedProvider>,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    let provider = provider.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;

    match query.search_type.as_str() {
        "filename" => Ok(Json(provider.search_file_names(&query.q)?).into_response()),
        "content" => Ok(Json(provider.search_content(&query.q)?).into_response()),
        other => Err(AppError::BadRequest(format!(
            "invalid search type '{}': must be 'filename' or 'content'",
            other
        ))),
    }
}
