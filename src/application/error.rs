//! # Application Errors
//!
//! Error taxonomies for the allocation engine and the order placement
//! coordinator.
//!
//! The placement taxonomy follows the failure table of the two-step
//! protocol: check-step failures left nothing behind, reserve-step
//! timeouts have an unknown outcome, and an order-persistence failure
//! after a confirmed reservation is an inconsistency that needs manual
//! reconciliation — the coordinator never papers over either by retrying.
//!
//! # Examples
//!
//! ```
//! use stockroom::application::error::PlacementError;
//!
//! let err = PlacementError::upstream_unavailable("connection refused");
//! assert!(err.is_retryable());
//! assert!(!err.requires_reconciliation());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{BatchId, ProductId, Quantity, ReservationToken};
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Error type for allocation engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The product has no batch records in the candidate universe.
    #[error("no inventory found for product {0}")]
    NotFound(ProductId),

    /// Candidate stock cannot cover the requested quantity.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity the caller asked for.
        requested: Quantity,
        /// Total quantity the candidates hold.
        available: Quantity,
    },

    /// Domain rule violation during allocation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The batch store failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl EngineError {
    /// Returns true if the product was unknown.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if stock was insufficient.
    #[must_use]
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, Self::InsufficientStock { .. })
    }
}

/// Result type for allocation engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for order placement.
///
/// Variants correspond to the terminal failure states of the placement
/// state machine. `NotFound` and `InsufficientStock` are client errors and
/// must not be conflated; `AmbiguousOutcome` and `StorageFailure` form the
/// "manual reconciliation required" category.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The request was rejected before any remote call was made.
    #[error("invalid order request: {0}")]
    InvalidRequest(String),

    /// The availability check answered 404.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// The availability check showed too little stock; reserve was never
    /// called.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity the caller asked for.
        requested: Quantity,
        /// Total quantity the check reported.
        available: Quantity,
    },

    /// The availability check could not reach the inventory service.
    /// Nothing has happened; the caller may retry.
    #[error("inventory service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The reserve call failed with a definite answer: the request never
    /// left, or upstream said no (including `success == false` bodies).
    #[error("failed to reserve inventory: {0}")]
    ReservationFailed(String),

    /// The reserve call timed out or was cancelled mid-flight; whether
    /// stock was decremented is unknown. Carries the idempotency token for
    /// reconciliation.
    #[error("reservation outcome unknown (token {token}): {message}")]
    AmbiguousOutcome {
        /// Token the reservation was attempted under.
        token: ReservationToken,
        /// Error message.
        message: String,
    },

    /// The order could not be persisted after a confirmed reservation:
    /// stock is decremented upstream with no corresponding order.
    #[error("order persistence failed after reservation (token {token}): {message}")]
    StorageFailure {
        /// Token the reservation was carried out under.
        token: ReservationToken,
        /// Batches the confirmed reservation drew from.
        reserved_batch_ids: Vec<BatchId>,
        /// Error message.
        message: String,
    },
}

impl PlacementError {
    /// Creates an invalid-request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an upstream-unavailable error.
    #[must_use]
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    /// Creates a reservation-failed error.
    #[must_use]
    pub fn reservation_failed(message: impl Into<String>) -> Self {
        Self::ReservationFailed(message.into())
    }

    /// Returns true if the caller can safely retry the whole placement.
    ///
    /// Only true for check-step transport failures, where nothing has
    /// happened upstream yet.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }

    /// Returns true if the failure left (or may have left) stock
    /// decremented without an order, requiring manual reconciliation.
    #[must_use]
    pub fn requires_reconciliation(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousOutcome { .. } | Self::StorageFailure { .. }
        )
    }
}

/// Result type for order placement.
pub type PlacementResult<T> = Result<T, PlacementError>;
