//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors
///
/// Every service returns this type; the API layer owns the mapping to
/// status codes and never forwards `message` fields to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Authentication(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Valid identity, insufficient scope
    #[error("Forbidden: {reason}")]
    Authorization { reason: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Uniqueness violation
    #[error("Conflict on {resource}")]
    Conflict { resource: String },

    /// Backing store unavailable; safe to retry
    #[error("Storage temporarily unavailable: {message}")]
    TransientStorage { message: String },

    /// A paired write could not commit both halves; nothing was kept
    #[error("Integrity failure: {message}")]
    Integrity { message: String },

    /// COMMIT was sent but never acknowledged; the rows may exist
    #[error("Commit outcome unknown: {message}")]
    CommitUnknown { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Authorization { reason: reason.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientStorage { .. })
    }

    /// Whether a failed write is known to have left nothing behind
    pub fn is_rolled_back(&self) -> bool {
        !matches!(self, Self::CommitUnknown { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
