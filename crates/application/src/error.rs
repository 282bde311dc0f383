//! Application error types

use courier_domain::DomainError;
use thiserror::Error;

use crate::ports::StoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The input was rejected.
    #[error("invalid input: {0}")]
    Invalid(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
