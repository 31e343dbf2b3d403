//! Error types for the products service
//!
//! Provides unified error handling using thiserror. Each layer owns one enum:
//! the store and cache clients raise `StoreError` / `CacheError`, the
//! repository wraps both in `RepositoryError`, and handlers answer with
//! `ApiError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failure raised by the record store client.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable or connection unusable
    #[error("Store connection error: {0}")]
    Connection(String),

    /// Constraint violation (primary key, NOT NULL, ...)
    #[error("Store constraint violation: {0}")]
    Constraint(String),

    /// Malformed statement or unexpected row shape
    #[error("Store query error: {0}")]
    Query(String),
}

// == Cache Error Enum ==
/// Failure raised by the cache client.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache unreachable, timed out or refused the client
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// The server rejected a command, e.g. a hash command on a key holding
    /// another type
    #[error("Cache command error: {0}")]
    Command(String),
}

// == Repository Error Enum ==
/// Error returned by the cache-coherent repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Input rejected before any store or cache access
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The row just inserted could not be read back
    #[error("Post-insert verification failed: product {0} not found after insert")]
    PostInsertVerification(i64),
}

// == Api Error Enum ==
/// Error type answered by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Product not found
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Repository(RepositoryError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Repository(RepositoryError::Store(StoreError::Constraint(_))) => {
                StatusCode::CONFLICT
            }
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, ApiError>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type CacheResult<T> = std::result::Result<T, CacheError>;

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
