//! # Reservation Results
//!
//! Value-carrying results of the allocation engine's two surfaces.
//!
//! [`AllocationOutcome`] is the pure diff computed by a strategy;
//! [`ReservationReceipt`] is what a persisted reservation hands back to
//! the caller; [`InventorySnapshot`] is the read-only availability view.

use crate::domain::entities::batch::Batch;
use crate::domain::value_objects::{BatchId, ProductId, Quantity, ReservationToken};
use serde::{Deserialize, Serialize};

/// The diff computed by an allocation strategy.
///
/// Holds the updated batch set alongside the ids consumed, in consumption
/// order. Callers persist `updated_batches` as one write or discard the
/// whole outcome; partial application is never valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// Batch ids drawn from, in the order consumption occurred.
    pub consumed_batch_ids: Vec<BatchId>,
    /// The full batch set with quantities decremented.
    pub updated_batches: Vec<Batch>,
}

/// Receipt for a persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationReceipt {
    /// Token the reservation was carried out under.
    pub token: ReservationToken,
    /// Product the stock was drawn from.
    pub product_id: ProductId,
    /// Quantity reserved.
    pub quantity: Quantity,
    /// Batch ids drawn from, in consumption order. Order is significant:
    /// it reflects the strategy's tie-break.
    pub consumed_batch_ids: Vec<BatchId>,
}

/// Read-only availability view for one product.
///
/// Batches appear in the strategy's display order and include
/// zero-quantity records, which stay visible for audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    /// The product.
    pub product_id: ProductId,
    /// Product display name, denormalized from the batch records.
    pub product_name: String,
    /// Batches in the strategy's display order.
    pub batches: Vec<Batch>,
    /// Sum of all batch quantities.
    pub total_available: Quantity,
}

impl InventorySnapshot {
    /// Builds a snapshot, computing the total from the given batches.
    #[must_use]
    pub fn new(product_id: ProductId, product_name: impl Into<String>, batches: Vec<Batch>) -> Self {
        let total_available = batches.iter().map(Batch::quantity).sum();
        Self {
            product_id,
            product_name: product_name.into(),
            batches,
            total_available,
        }
    }

    /// Returns true if the snapshot can cover `requested`.
    #[must_use]
    pub fn covers(&self, requested: Quantity) -> bool {
        self.total_available >= requested
    }
}
