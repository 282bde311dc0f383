//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request method is not supported.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The snippet target identifier is not known.
    #[error("unknown snippet target: {0}")]
    UnknownTarget(String),

    /// A variable reference is malformed.
    #[error("invalid variable reference: {0}")]
    InvalidVariableReference(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A criterion operator name is not known.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
