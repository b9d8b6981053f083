use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Failed to load content: {0}")]
    Load(String),

    #[error("Failed to export PDF: {0}")]
    Export(String),

    #[error("Browser returned an empty document")]
    EmptyOutput,

    #[error("Render timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

/// Scratch storage failures.
///
/// Messages never carry filesystem paths; those only go to the log.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("scratch directory unavailable: {0}")]
    ScratchDir(std::io::Error),

    #[error("failed to write artifact: {0}")]
    Write(std::io::Error),

    #[error("failed to read artifact: {0}")]
    Read(std::io::Error),

    #[error("failed to remove artifact: {0}")]
    Remove(std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Render(RenderError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
