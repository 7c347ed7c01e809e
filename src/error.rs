//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `InvalidPath`, `NotADirectory`, `SelfContainment`, `EmptyMessage`, `BadRequest` → 400
//! - `NotAGitRepository`, `BranchNotFound`, `FileNotFound`, `NotAFile` → 404
//! - `DestinationExists` → 409
//! - `Git`, `Io`, `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is not a git repository")]
    NotAGitRepository(String),

    #[error("Branch '{0}' not found")]
    BranchNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Path is a directory, not a file: {0}")]
    NotAFile(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Destination already exists: {0}")]
    DestinationExists(String),

    #[error("Cannot move folder '{from}' into itself ('{to}')")]
    SelfContainment { from: String, to: String },

    #[error("Commit message cannot be empty")]
    EmptyMessage,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPath(_)
            | AppError::NotADirectory(_)
            | AppError::SelfContainment { .. }
            | AppError::EmptyMessage
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotAGitRepository(_)
            | AppError::BranchNotFound(_)
            | AppError::FileNotFound(_)
            | AppError::NotAFile(_) => StatusCode::NOT_FOUND,
            AppError::DestinationExists(_) => StatusCode::CONFLICT,
            AppError::Git(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
