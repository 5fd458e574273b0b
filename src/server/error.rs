//! API Errors
//!
//! One error type for every handler, mapped onto status codes and the
//! `{"error": …}` body shape the client expects. Storage failures are not
//! given special treatment: they surface as generic 500s and a log line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::store::StoreError;

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request. No partial writes happen.
    #[error("{0}")]
    BadRequest(String),

    /// Authentication failed.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// Storage failure, surfaced generically.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::Store(err) => {
                tracing::error!("storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
