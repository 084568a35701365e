//! Errors raised by catalog construction and dispensing.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Why a catalog could not be built or a dispense was refused.
///
/// Lookups that miss are not errors: an unknown drink is simply unavailable
/// and dispensing it does nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A recipe line asked for zero units.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Strict dispensing was asked for a drink the inventory cannot cover.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A blank drink or ingredient id, or a machine id that is not a UUID.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two ingredients or two drinks share an id.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
