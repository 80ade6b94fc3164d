use crate::storage::{StorageError, TaskFileStore};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// JSON body returned by every failed API call.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// JSON body returned after the collection was saved.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SaveResponse {
    pub success: bool,
}

/// Custom error type for task API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The task file could not be read.
    #[error("Failed to read tasks")]
    Read(#[source] StorageError),
    /// The task file could not be written.
    #[error("Failed to save tasks")]
    Write(#[source] StorageError),
    /// The request body was not a JSON array.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Read(_) | ApiError::Write(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Handler for GET /api/tasks - Returns the stored collection.
#[tracing::instrument(skip(store))]
pub async fn get_tasks_handler(
    State(store): State<Arc<TaskFileStore>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    match store.read_all().await {
        Ok(tasks) => Ok(Json(tasks)),
        Err(err) => {
            tracing::error!("Error reading tasks: {}", err);
            Err(ApiError::Read(err))
        }
    }
}

/// Handler for POST /api/tasks - Replaces the stored collection with the request body.
#[tracing::instrument(skip(store, payload))]
pub async fn save_tasks_handler(
    State(store): State<Arc<TaskFileStore>>,
    payload: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(tasks) = payload.inspect_err(|rejection| {
        tracing::warn!("Rejected task upload: {}", rejection.body_text());
    })?;

    match store.write_all(&tasks).await {
        Ok(()) => {
            tracing::info!("Saved {} tasks", tasks.len());
            Ok(Json(SaveResponse { success: true }))
        }
        Err(err) => {
            tracing::error!("Error writing tasks: {}", err);
            Err(ApiError::Write(err))
        }
    }
}

/// Creates and returns the tasks API router.
pub fn create_api_router(store: Arc<TaskFileStore>) -> Router {
    Router::new()
        .route("/api/tasks", get(get_tasks_handler).post(save_tasks_handler))
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn can_handle_storage_error_with_internal_server_error() {
        let storage_error = StorageError::Io {
            path: "tasks.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let response = ApiError::Write(storage_error).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Failed to save tasks"})
        );
    }

    #[tokio::test]
    async fn read_errors_do_not_leak_paths() {
        let storage_error = StorageError::Io {
            path: "/secret/tasks.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        let response = ApiError::Read(storage_error).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Failed to read tasks"})
        );
    }
}
