//! Working copy editing endpoints.
//!
//! - POST /api/write { path, content }
//! - POST /api/delete { path }
//! - POST /api/move { oldPath, newPath }
//! - POST /api/move-folder { oldPath, newPath }
//!
//! Each returns `{ success: true }`. These hold the provider's write guard so
//! they never interleave with each other or with reads.
//!
//! Used by: Editor, CreateFileDialog, RenameDialog, DeleteConfirmDialog

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::git::SharedProvider;

pub fn routes(provider: SharedProvider) -> Router {
    Router::new()
        .route("/api/write", post(write_file))
        .route("/api/delete", post(delete_file))
        .route("/api/move", post(move_file))
        .route("/api/move-folder", post(move_folder))
        .with_state(provider)
}

#[derive(Debug, Deserialize)]
pub struct WriteRequest {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub old_path: String,
    pub new_path: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

const SUCCESS: SuccessResponse = SuccessResponse { success: true };

pub async fn write_file(
    State(provider): State<SharedProvider>,
    Json(request): Json<WriteRequest>,
) -> Result<Json<SuccessResponse>> {
    let provider = provider.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    provider.write_file(&request.path, request.content.as_bytes())?;
    Ok(Json(SUCCESS))
}

pub async fn delete_file(
    State(provider): State<SharedProvider>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<SuccessResponse>> {
    let provider = provider.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    provider.delete_file(&request.path)?;
    Ok(Json(SUCCESS))
}

pub async fn move_file(
    State(provider): State<SharedProvider>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<SuccessResponse>> {
    let provider = provider.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    provider.move_file(&request.old_path, &request.new_path)?;
    Ok(Json(SUCCESS))
}

pub async fn move_folder(
    State(provider): State<SharedProvider>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<SuccessResponse>> {
    let provider = provider.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    provider.move_folder(&request.old_path, &request.new_path)?;
    Ok(Json(SUCCESS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::shared;
    use crate::git::test_support::provider_with;

    #[test]
    fn move_request_uses_camel_case() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"oldPath": "a.md", "newPath": "b.md"}"#).unwrap();
        assert_eq!(request.old_path, "a.md");
        assert_eq!(request.new_path, "b.md");
    }

    #[tokio::test]
    async fn write_then_move_then_delete() {
        let (dir, provider) = provider_with(&[("README.md", "hi")]);
        let provider = shared(provider);

        let Json(response) = write_file(
            State(provider.clone()),
            Json(WriteRequest { path: "notes/today.md".into(), content: "# Today".into() }),
        )
        .await
        .unwrap();
        assert!(response.success);
        assert!(dir.path().join("notes/today.md").is_file());

        let Json(response) = move_folder(
            State(provider.clone()),
            Json(MoveRequest { old_path: "notes".into(), new_path: "journal".into() }),
        )
        .await
        .unwrap();
        assert!(response.success);

        let Json(response) = move_file(
            State(provider.clone()),
            Json(MoveRequest { old_path: "journal/today.md".into(), new_path: "journal/monday.md".into() }),
        )
        .await
        .unwrap();
        assert!(response.success);
        assert!(dir.path().join("journal/monday.md").is_file());

        let Json(response) = delete_file(State(provider), Json(DeleteRequest { path: "journal/monday.md".into() }))
            .await
            .unwrap();
        assert!(response.success);
        assert!(!dir.path().join("journal/monday.md").exists());
    }

    #[tokio::test]
    async fn folder_into_itself_is_rejected() {
        let (_dir, provider) = provider_with(&[("a/one.md", "1")]);

        let result = move_folder(
            State(shared(provider)),
            Json(MoveRequest { old_path: "a".into(), new_path: "a/b".into() }),
        )
        .await;
        assert!(matches!(result, Err(AppError::SelfContainment { .. })));
    }
}
