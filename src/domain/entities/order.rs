//! # Order Entity
//!
//! An order recorded after a successful reservation.
//!
//! Orders are created by the order placement coordinator and never mutated
//! by it afterwards; `Shipped` and `Delivered` transitions belong to a
//! fulfillment subsystem outside this crate. The reserved batch ids are a
//! back-reference recorded at creation time, not a live foreign key.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{BatchId, OrderId, ProductId, Quantity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::value_objects::strategy_kind::ParseEnumError;

/// Lifecycle state of an order.
///
/// Only [`OrderStatus::Placed`] is assigned here; later states are managed
/// by fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order recorded against a confirmed reservation.
    Placed,
    /// Order handed to a carrier (managed elsewhere).
    Shipped,
    /// Order received by the customer (managed elsewhere).
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed => write!(f, "PLACED"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLACED" => Ok(Self::Placed),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            _ => Err(ParseEnumError("OrderStatus", s.to_string())),
        }
    }
}

/// An order referencing the reservation it was placed against.
///
/// # Invariants
///
/// - `quantity` is positive
/// - `product_name` is non-empty (copied from the availability check at
///   check time, not re-verified at reserve time)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned by the order store; `None` until persisted.
    order_id: Option<OrderId>,
    /// Ordered product.
    product_id: ProductId,
    /// Product display name captured at check time.
    product_name: String,
    /// Ordered quantity.
    quantity: Quantity,
    /// Lifecycle state.
    status: OrderStatus,
    /// Batches the reservation drew from, in consumption order.
    reserved_batch_ids: Vec<BatchId>,
    /// Date the order was placed.
    placed_on: NaiveDate,
}

impl Order {
    /// Creates a freshly placed, not-yet-persisted order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuantity`] for a zero quantity and
    /// [`DomainError::ValidationError`] for an empty product name.
    pub fn placed(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: Quantity,
        reserved_batch_ids: Vec<BatchId>,
        placed_on: NaiveDate,
    ) -> DomainResult<Self> {
        let product_name = product_name.into();
        if !quantity.is_positive() {
            return Err(DomainError::invalid_quantity(
                "order quantity must be positive",
            ));
        }
        if product_name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        Ok(Self {
            order_id: None,
            product_id,
            product_name,
            quantity,
            status: OrderStatus::Placed,
            reserved_batch_ids,
            placed_on,
        })
    }

    /// Returns a copy of this order with the store-assigned identifier.
    #[must_use]
    pub fn with_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Returns the assigned identifier, if persisted.
    #[inline]
    #[must_use]
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Returns the ordered product identifier.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the product display name.
    #[inline]
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the ordered quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the lifecycle state.
    #[inline]
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the batch ids the reservation drew from, in consumption order.
    #[inline]
    #[must_use]
    pub fn reserved_batch_ids(&self) -> &[BatchId] {
        &self.reserved_batch_ids
    }

    /// Returns the placement date.
    #[inline]
    #[must_use]
    pub fn placed_on(&self) -> NaiveDate {
        self.placed_on
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order_id {
            Some(id) => write!(
                f,
                "Order(id={}, product={}, qty={}, status={})",
                id, self.product_id, self.quantity, self.status,
            ),
            None => write!(
                f,
                "Order(unsaved, product={}, qty={}, status={})",
                self.product_id, self.quantity, self.status,
            ),
        }
    }
}
