//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Rejection of catalog data: a malformed product or insight, a bad id, or a
/// duplicate id when a catalog is assembled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field is out of range or empty.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two catalog entries share an id.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            DomainError::validation("price must be finite").to_string(),
            "validation failed: price must be finite"
        );
        assert_eq!(
            DomainError::conflict("duplicate product id 1").to_string(),
            "conflict: duplicate product id 1"
        );
        assert!(matches!(DomainError::invalid_id("x"), DomainError::InvalidId(_)));
    }
}
