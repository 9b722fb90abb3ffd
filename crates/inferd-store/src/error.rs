//! Error types for the storage layer.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found.
    #[error("record not found")]
    NotFound,

    /// A record with the same key already exists.
    #[error("record already exists: {0}")]
    Conflict(String),

    /// A backend error occurred.
    #[error("storage error: {0}")]
    Backend(String),
}
