//! # Domain Errors
//!
//! Error types for business rule violations.
//!
//! # Examples
//!
//! ```
//! use stockroom::domain::errors::DomainError;
//! use stockroom::domain::value_objects::Quantity;
//!
//! let err = DomainError::Shortage {
//!     requested: Quantity::new(100),
//!     available: Quantity::new(29),
//! };
//! assert!(err.is_shortage());
//! ```

use crate::domain::value_objects::{ArithmeticError, Quantity};
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Candidate batches cannot cover the requested quantity.
    #[error("insufficient stock: requested {requested}, available {available}")]
    Shortage {
        /// Quantity the caller asked for.
        requested: Quantity,
        /// Total quantity the candidate batches hold.
        available: Quantity,
    },

    /// A quantity argument violated an invariant.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A field or argument failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid-quantity error.
    #[must_use]
    pub fn invalid_quantity(message: impl Into<String>) -> Self {
        Self::InvalidQuantity(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Returns true if this is a shortage error.
    #[must_use]
    pub fn is_shortage(&self) -> bool {
        matches!(self, Self::Shortage { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortage_carries_both_numbers() {
        let err = DomainError::Shortage {
            requested: Quantity::new(50),
            available: Quantity::new(29),
        };
        assert!(err.is_shortage());
        assert!(err.to_string().contains("50"));
        assert!(err.to_string().contains("29"));
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::validation("product name must not be empty");
        assert!(!err.is_shortage());
        assert!(err.to_string().contains("product name"));
    }

    #[test]
    fn arithmetic_error_converts() {
        let err: DomainError = ArithmeticError::Underflow {
            minuend: 3,
            subtrahend: 29,
        }
        .into();
        assert!(err.to_string().contains("underflow"));
    }
}
