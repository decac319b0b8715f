//! Error types for the video resource handlers.

use std::error::Error;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Error type for resource handler operations.
#[derive(Debug)]
pub enum ApiError {
    /// No video with this identifier.
    NotFound(String),
    /// Request body could not be decoded.
    BadRequest(String),
    /// Document store failure.
    Store(StoreError),
    /// The blocking task running a store call panicked or was cancelled.
    Task(String),
    /// The request did not finish within the configured timeout.
    Timeout,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(id) => write!(f, "video not found: {}", id),
            ApiError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ApiError::Store(e) => write!(f, "store error: {}", e),
            ApiError::Task(msg) => write!(f, "store task failed: {}", msg),
            ApiError::Timeout => write!(f, "request timed out"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Task(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Store(e) => {
                error!(error = %e, "document store operation failed");
                "internal server error".to_string()
            }
            ApiError::Task(msg) => {
                error!(error = %msg, "store task failed");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };
        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
