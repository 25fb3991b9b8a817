//! # Remote Client Errors
//!
//! Error types for the network boundary to the allocation engine.
//!
//! The taxonomy keeps timeouts distinct from connection failures: a timed
//! out request may have been delivered, so its outcome is unknown, while a
//! request that never connected definitely did not happen. The order
//! placement coordinator relies on that distinction.
//!
//! # Examples
//!
//! ```
//! use stockroom::infrastructure::remote::error::ClientError;
//!
//! let err = ClientError::timeout("request timed out after 5000ms");
//! assert!(err.is_timeout());
//! assert!(err.is_retryable());
//!
//! let err = ClientError::not_found("no inventory for product 9999");
//! assert!(!err.is_retryable());
//! ```

use thiserror::Error;

/// Error type for remote inventory calls.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Request timed out; the outcome upstream is unknown.
    #[error("inventory timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error; the request never reached upstream.
    #[error("inventory connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Upstream answered 404: the product is unknown there.
    #[error("inventory not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Upstream rejected the request as malformed (400).
    #[error("inventory invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Upstream reported insufficient stock (422).
    #[error("inventory insufficient stock: {message}")]
    InsufficientStock {
        /// Error message.
        message: String,
    },

    /// Response could not be parsed, or an unexpected status was returned.
    #[error("inventory protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal client error.
    #[error("inventory client internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ClientError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an invalid-request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an insufficient-stock error.
    #[must_use]
    pub fn insufficient_stock(message: impl Into<String>) -> Self {
        Self::InsufficientStock {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if this is a not-found answer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if retrying the same call could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection { .. })
    }
}

/// Result type for remote inventory calls.
pub type ClientResult<T> = Result<T, ClientError>;
