//! # Batch Entity
//!
//! A dated lot of stock for one product with a remaining quantity.
//!
//! Batches are created by data load / administration and mutated only by
//! the allocation engine's reservation step. A batch whose quantity has
//! been drawn down to zero remains a valid record: it is skipped by
//! allocation but stays visible for audit.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use stockroom::domain::entities::batch::Batch;
//! use stockroom::domain::value_objects::{BatchId, ProductId, Quantity};
//!
//! let mut batch = Batch::new(
//!     BatchId::new(9),
//!     ProductId::new(1002),
//!     "Smoked Salmon",
//!     Quantity::new(29),
//!     NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
//! ).unwrap();
//!
//! batch.consume(Quantity::new(3)).unwrap();
//! assert_eq!(batch.quantity(), Quantity::new(26));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{BatchId, ProductId, Quantity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dated stock batch for one product.
///
/// # Invariants
///
/// - `quantity >= 0` at all times (enforced by the unsigned representation
///   and checked decrements)
/// - `product_name` is non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Batch identifier, unique within the product.
    batch_id: BatchId,
    /// Owning product.
    product_id: ProductId,
    /// Denormalized product display name.
    product_name: String,
    /// Remaining units in this batch.
    quantity: Quantity,
    /// Calendar expiry date, no time component.
    expiry_date: NaiveDate,
}

impl Batch {
    /// Creates a new batch with validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValidationError`] if the product name is empty.
    pub fn new(
        batch_id: BatchId,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: Quantity,
        expiry_date: NaiveDate,
    ) -> DomainResult<Self> {
        let product_name = product_name.into();
        if product_name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        Ok(Self {
            batch_id,
            product_id,
            product_name,
            quantity,
            expiry_date,
        })
    }

    /// Returns the batch identifier.
    #[inline]
    #[must_use]
    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    /// Returns the owning product identifier.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the denormalized product display name.
    #[inline]
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the remaining quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the expiry date.
    #[inline]
    #[must_use]
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Returns true if this batch has no stock left.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Decrements the remaining quantity by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Arithmetic`] if `amount` exceeds the
    /// remaining quantity; the batch is left unchanged in that case.
    pub fn consume(&mut self, amount: Quantity) -> DomainResult<()> {
        self.quantity = self.quantity.safe_sub(amount)?;
        Ok(())
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Batch(id={}, product={}, qty={}, expires={})",
            self.batch_id, self.product_id, self.quantity, self.expiry_date,
        )
    }
}
