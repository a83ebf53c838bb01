//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No onboarding record exists for the given key.
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// The caller has no identity.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller has an identity but lacks the required privilege.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A presence check failed before any remote call was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
