//! # HTTP API Errors
//!
//! Every failure a handler can return, with its status code. Error bodies
//! are `{"error": "...", "code": <status>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::repository::RepositoryError;
use crate::schema::ValidationError;
use crate::storage::InvalidIdentifier;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body or path could not be parsed at all
    #[error("{0}")]
    BadRequest(String),

    /// Identifier is not 24 hex characters
    #[error("{0}")]
    InvalidIdentifier(#[from] InvalidIdentifier),

    /// Filter value outside the accepted range
    #[error("{0}")]
    OutOfRange(String),

    /// Body parsed but violates the schema
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No such record (or, for updates, nothing to apply)
    #[error("{0}")]
    NotFound(&'static str),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Insert succeeded but the record could not be read back
    #[error("{0}")]
    CreateFailed(String),

    /// Store call failed
    #[error("{0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::OutOfRange(_) => StatusCode::BAD_REQUEST,

            // 422 Unprocessable Entity
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 404 Not Found
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            ApiError::CreateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidIdentifier(e) => ApiError::InvalidIdentifier(e),
            RepositoryError::StoreUnavailable(e) => ApiError::StoreUnavailable(e.to_string()),
            e @ RepositoryError::CreateFailed { .. } => ApiError::CreateFailed(e.to_string()),
            e @ RepositoryError::Decode { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
