//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// invariants). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested unit does not match the unit already stored for a name.
    /// Always aborts the whole batch with zero writes.
    #[error("unit mismatch for {name}")]
    UnitMismatch { name: String },

    /// Consuming the requested amount would drive stock below zero.
    /// Always aborts the whole batch with zero writes.
    #[error("not enough {name}")]
    InsufficientStock { name: String },

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn unit_mismatch(name: impl Into<String>) -> Self {
        Self::UnitMismatch { name: name.into() }
    }

    pub fn insufficient_stock(name: impl Into<String>) -> Self {
        Self::InsufficientStock { name: name.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
