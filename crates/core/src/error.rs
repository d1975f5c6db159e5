//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// invariants, conflicts). Infrastructure failures are folded into
/// `Internal` at the service boundary so callers see one taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. missing field, negative quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflict occurred (duplicate create, insufficient stock,
    /// capacity violation, stale concurrent write).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Credential check failed. Deliberately carries no detail so that
    /// "unknown user" and "wrong password" are indistinguishable.
    #[error("invalid credentials")]
    Unauthorized,

    /// Unexpected internal failure (e.g. persistence unavailable).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
