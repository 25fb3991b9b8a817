//! # Order Placement Coordinator
//!
//! Sequences a remote availability check and a remote reservation into
//! one logical order placement.
//!
//! Each placement walks `Start → Checked → Reserved → Recorded`; any step
//! can drop to a terminal failure. The walk is one logical transaction
//! from the caller's perspective but is *not* atomic across the network:
//!
//! - Before the reserve call, nothing has happened upstream; those
//!   failures are safe.
//! - A reserve timeout has an unknown outcome. It is surfaced as
//!   [`PlacementError::AmbiguousOutcome`] with the idempotency token —
//!   never retried here, because only the caller can decide to replay.
//! - Order persistence failing after a confirmed reservation leaves stock
//!   decremented with no order. That inconsistency window is surfaced as
//!   [`PlacementError::StorageFailure`]; no compensation call exists.

use crate::application::error::{PlacementError, PlacementResult};
use crate::domain::entities::order::Order;
use crate::domain::value_objects::{ProductId, Quantity, ReservationToken};
use crate::infrastructure::persistence::OrderRepository;
use crate::infrastructure::remote::contracts::ReserveRequest;
use crate::infrastructure::remote::error::ClientError;
use crate::infrastructure::remote::traits::InventoryClient;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// A caller's request to place an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacementRequest {
    /// Product to order.
    pub product_id: ProductId,
    /// Units to order.
    pub quantity: Quantity,
}

/// Confirmation of a recorded order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfirmation {
    /// The persisted order, id assigned.
    pub order: Order,
    /// Human-readable confirmation.
    pub message: String,
}

/// Coordinates the check-then-reserve protocol and records the order.
#[derive(Debug)]
pub struct OrderPlacementCoordinator {
    inventory: Arc<dyn InventoryClient>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderPlacementCoordinator {
    /// Creates a coordinator over the given inventory client and order
    /// store.
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryClient>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { inventory, orders }
    }

    /// Places an order for the requested product and quantity.
    ///
    /// # Errors
    ///
    /// - [`PlacementError::InvalidRequest`]: zero quantity, rejected
    ///   before any remote call
    /// - [`PlacementError::ProductNotFound`] /
    ///   [`PlacementError::InsufficientStock`]: client errors from the
    ///   check step; reserve is never called
    /// - [`PlacementError::UpstreamUnavailable`]: the check could not run;
    ///   safe to retry
    /// - [`PlacementError::ReservationFailed`]: the reserve step answered
    ///   with a definite failure
    /// - [`PlacementError::AmbiguousOutcome`]: the reserve step timed out;
    ///   outcome unknown
    /// - [`PlacementError::StorageFailure`]: the order could not be
    ///   recorded after a confirmed reservation
    pub async fn place_order(
        &self,
        request: OrderPlacementRequest,
    ) -> PlacementResult<PlacementConfirmation> {
        let OrderPlacementRequest {
            product_id,
            quantity,
        } = request;
        info!(product_id = %product_id, quantity = %quantity, "processing order");

        if !quantity.is_positive() {
            return Err(PlacementError::invalid_request(
                "order quantity must be positive",
            ));
        }

        // Start -> Checked
        let availability = self
            .inventory
            .fetch_availability(product_id)
            .await
            .map_err(|e| match e {
                ClientError::NotFound { .. } => PlacementError::ProductNotFound(product_id),
                other => {
                    error!(error = %other, "failed to check inventory");
                    PlacementError::upstream_unavailable(other.to_string())
                }
            })?;

        let available = availability.total_available();
        if available < quantity {
            return Err(PlacementError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        // Checked -> Reserved. The token makes a caller-driven replay of an
        // ambiguous outcome safe; the coordinator itself never retries.
        let token = ReservationToken::new_v4();
        let reserve_request = ReserveRequest {
            product_id,
            quantity,
            idempotency_key: Some(token),
        };
        let reservation = self
            .inventory
            .reserve(&reserve_request)
            .await
            .map_err(|e| match e {
                ClientError::Timeout { message } => {
                    error!(token = %token, "reserve call timed out, outcome unknown");
                    PlacementError::AmbiguousOutcome { token, message }
                }
                other => {
                    error!(error = %other, "failed to reserve inventory");
                    PlacementError::reservation_failed(other.to_string())
                }
            })?;

        if !reservation.success {
            error!(message = %reservation.message, "reservation rejected");
            return Err(PlacementError::reservation_failed(reservation.message));
        }

        // Reserved -> Recorded
        let order = Order::placed(
            product_id,
            availability.product_name.clone(),
            quantity,
            reservation.reserved_batch_ids.clone(),
            Utc::now().date_naive(),
        )
        .map_err(|e| PlacementError::StorageFailure {
            token,
            reserved_batch_ids: reservation.reserved_batch_ids.clone(),
            message: e.to_string(),
        })?;

        let saved = self.orders.save(order).await.map_err(|e| {
            error!(token = %token, error = %e, "order persistence failed after reservation");
            PlacementError::StorageFailure {
                token,
                reserved_batch_ids: reservation.reserved_batch_ids.clone(),
                message: e.to_string(),
            }
        })?;

        info!(order = %saved, "order placed");
        Ok(PlacementConfirmation {
            order: saved,
            message: "Order placed. Inventory reserved.".to_string(),
        })
    }
}
