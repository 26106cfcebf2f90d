//! Domain error model.

use thiserror::Error;

/// Result type used across the entity layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Entity-level error.
///
/// Covers bad constructor input and broken entity invariants. Storage and
/// snapshot failures belong to the storage engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Constructor input failed validation (explicit null for an identity
    /// field, unparsable timestamp, wrong value kind).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An entity invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier or composite key was invalid.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An attribute set could not be converted to or from its record form.
    #[error("serialization failed: {0}")]
    Serialization(String),
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

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}
