//! # Wire Contracts
//!
//! Request and response bodies exchanged with the allocation engine's
//! network surface. Field names follow the upstream JSON contract
//! (`camelCase`), dates travel as `YYYY-MM-DD` calendar strings.

use crate::domain::value_objects::{BatchId, ProductId, Quantity, ReservationToken};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One batch as reported by the availability surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Batch identifier.
    pub batch_id: BatchId,
    /// Remaining units.
    pub quantity: Quantity,
    /// Calendar expiry date.
    pub expiry_date: NaiveDate,
}

/// Availability answer for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// The product.
    pub product_id: ProductId,
    /// Product display name.
    pub product_name: String,
    /// Batches in the engine's display order.
    pub batches: Vec<BatchSummary>,
}

impl AvailabilityResponse {
    /// Sums the reported batch quantities.
    #[must_use]
    pub fn total_available(&self) -> Quantity {
        self.batches.iter().map(|b| b.quantity).sum()
    }
}

/// Reservation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    /// The product to draw from.
    pub product_id: ProductId,
    /// Units to reserve.
    pub quantity: Quantity,
    /// Idempotency token; the engine replays the recorded receipt when it
    /// sees a token again within its replay window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<ReservationToken>,
}

/// Reservation answer.
///
/// A body with `success == false` is a failed reservation even when the
/// transport status was 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveResponse {
    /// Whether stock was reserved.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Batch ids drawn from, in consumption order.
    #[serde(default)]
    pub reserved_batch_ids: Vec<BatchId>,
}
