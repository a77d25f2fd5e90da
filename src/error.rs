//! Error types for the property service
//!
//! One enum per layer, all built on thiserror. Only `AppError` knows about HTTP.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend could not be reached or refused the operation
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    /// Key or value violates backend limits
    #[error("Invalid cache request: {0}")]
    InvalidRequest(String),
}

// == Store Error Enum ==
/// Errors raised by the property store and the write path.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No property with this id
    #[error("Property not found: {0}")]
    NotFound(i64),

    /// Input failed validation
    #[error("Invalid property: {0}")]
    Invalid(String),

    /// Store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The listing endpoint only answers GET
    #[error("Method not allowed")]
    MethodNotAllowed,
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Store(StoreError::NotFound(_)) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Store(StoreError::Invalid(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Store(StoreError::Unavailable(msg)) => {
                tracing::error!(error = %msg, "store failure while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::MethodNotAllowed => {
                let body = Json(json!({ "error": "Method not allowed" }));
                return (
                    StatusCode::METHOD_NOT_ALLOWED,
                    [(header::ALLOW, "GET")],
                    body,
                )
                    .into_response();
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Result type for cache backend operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, AppError>;
