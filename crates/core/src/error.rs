//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Mutations in this system reject bad input silently, so the only failures
/// that surface as values are parse-time ones at the boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
