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

// == Decode Error Enum ==
/// Failure to turn stored bytes back into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Stored bytes are not valid UTF-8
    #[error("Invalid UTF-8 data: {0}")]
    InvalidUtf8(String),

    /// Stored bytes are not a base-10 integer
    #[error("Invalid integer: {0:?}")]
    InvalidInteger(String),

    /// Stored bytes are not a decimal float
    #[error("Invalid float: {0:?}")]
    InvalidFloat(String),
}

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The underlying store cannot be reached or rejected the operation
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A retrieval decode function failed
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key not found (HTTP surface only, the core reports absence as `None`)
    #[error("Key not found: {0}")]
    NotFound(String),
}

impl CacheError {
    /// Shorthand for building a `StorageUnavailable` error.
    pub fn storage(msg: impl Into<String>) -> Self {
        CacheError::StorageUnavailable(msg.into())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
