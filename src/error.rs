//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A cache was constructed with a zero or unschedulably large time-to-live
    #[error("TTL must be greater than zero and small enough to schedule")]
    InvalidTtl,

    /// A cache was constructed outside a Tokio runtime, so its reaper cannot run
    #[error("Cache must be created inside a Tokio runtime")]
    NoRuntime,

    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidTtl | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::NoRuntime => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (CacheError::InvalidTtl, StatusCode::BAD_REQUEST),
            (
                CacheError::InvalidRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (CacheError::NotFound("k".to_string()), StatusCode::NOT_FOUND),
            (CacheError::NoRuntime, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::NotFound("x".to_string()).to_string(),
            "Key not found: x"
        );
        assert_eq!(
            CacheError::InvalidTtl.to_string(),
            "TTL must be greater than zero and small enough to schedule"
        );
    }
}
