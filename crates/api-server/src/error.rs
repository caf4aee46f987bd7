//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tt_core::ValidationError;

#[derive(Debug, Serialize)]
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

/// Outcomes a handler can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(ValidationError),

    #[error("Task not found")]
    TaskNotFound,

    #[error("{0}")]
    Internal(String),
}

impl From<tt_core::Error> for ApiError {
    fn from(err: tt_core::Error) -> Self {
        match err {
            tt_core::Error::Validation(e) => Self::Validation(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<tera::Error> for ApiError {
    fn from(err: tera::Error) -> Self {
        Self::Internal(format!("Template error: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, Json(e)).into_response(),
            Self::TaskNotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Task not found")),
            )
                .into_response(),
            // Details stay in the log; storage errors carry paths and SQL
            Self::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

/// Failures while starting the server
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Core(#[from] tt_core::Error),

    #[error("Failed to load templates: {0}")]
    Templates(#[from] tera::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let err = ApiError::from(tt_core::Error::Storage(
            "unable to open /srv/secret/tasks.db".to_string(),
        ));

        let (status, payload) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let (status, payload) = body_of(ApiError::TaskNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload, json!({"error": "Task not found"}));
    }
}
