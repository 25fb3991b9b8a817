//! # Batch Allocation Strategies
//!
//! Policies for consuming a requested quantity from a product's dated
//! batches.
//!
//! This module provides the [`AllocationStrategy`] trait and two
//! implementations:
//!
//! - [`OldestFirstStrategy`]: earliest expiry first (FEFO), the default
//! - [`NewestFirstStrategy`]: latest expiry first
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use stockroom::application::services::allocation_strategy::{
//!     AllocationStrategy, OldestFirstStrategy,
//! };
//! use stockroom::domain::entities::batch::Batch;
//! use stockroom::domain::value_objects::{BatchId, ProductId, Quantity};
//!
//! let batches = vec![Batch::new(
//!     BatchId::new(9),
//!     ProductId::new(1002),
//!     "Smoked Salmon",
//!     Quantity::new(29),
//!     NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
//! ).unwrap()];
//!
//! let outcome = OldestFirstStrategy
//!     .allocate(batches, Quantity::new(3))
//!     .unwrap();
//! assert_eq!(outcome.consumed_batch_ids.len(), 1);
//! ```

use crate::domain::entities::batch::Batch;
use crate::domain::entities::reservation::AllocationOutcome;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Quantity, StrategyKind};
use std::fmt;
use std::sync::Arc;

/// Trait for batch consumption policies.
///
/// Implementations define a total order over one product's batches and
/// consume the requested quantity along that order.
///
/// # Contract
///
/// - `allocate` operates on an owned snapshot and returns the computed
///   diff; on shortage it fails with
///   [`DomainError::Shortage`] carrying both numbers, and the caller must
///   discard the whole attempt — no partial mutation is observable.
/// - Zero-quantity batches are inert: skipped, never listed as consumed.
/// - A zero requested quantity is legal and yields an empty consumed list
///   with the batch set unchanged.
/// - The consumed-id order is significant: it reflects the strategy's
///   tie-break.
pub trait AllocationStrategy: Send + Sync + fmt::Debug {
    /// Sorts batches into this strategy's consumption (and display) order.
    fn sort_for_allocation(&self, batches: Vec<Batch>) -> Vec<Batch>;

    /// Allocates `quantity` across the given batches.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Shortage`] if the batches cannot cover the
    /// requested quantity.
    fn allocate(&self, batches: Vec<Batch>, quantity: Quantity) -> DomainResult<AllocationOutcome>;

    /// Returns the selector this strategy implements.
    fn kind(&self) -> StrategyKind;
}

/// Computes the total quantity across batches.
fn total_quantity(batches: &[Batch]) -> Quantity {
    batches.iter().map(Batch::quantity).sum()
}

/// Walks sorted batches, consuming until `quantity` is satisfied.
///
/// Shared by both strategies; the sort order is the only thing that
/// differs between them.
fn consume_in_order(
    sorted: Vec<Batch>,
    quantity: Quantity,
) -> DomainResult<AllocationOutcome> {
    let available = total_quantity(&sorted);
    if available < quantity {
        return Err(DomainError::Shortage {
            requested: quantity,
            available,
        });
    }

    let mut updated = sorted;
    let mut consumed_batch_ids = Vec::new();
    let mut remaining = quantity;

    for batch in &mut updated {
        if remaining.is_zero() {
            break;
        }
        if batch.is_empty() {
            continue;
        }

        let take = batch.quantity().min(remaining);
        batch.consume(take)?;
        remaining = remaining.safe_sub(take)?;
        consumed_batch_ids.push(batch.batch_id());
    }

    Ok(AllocationOutcome {
        consumed_batch_ids,
        updated_batches: updated,
    })
}

// ============================================================================
// Oldest-First Strategy
// ============================================================================

/// Consumes earliest-expiring batches first (FEFO). The default policy.
///
/// Sort order: expiry date ascending, ties broken by batch id ascending
/// for determinism.
#[derive(Debug, Clone, Default)]
pub struct OldestFirstStrategy;

impl OldestFirstStrategy {
    /// Creates a new oldest-first strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AllocationStrategy for OldestFirstStrategy {
    fn sort_for_allocation(&self, mut batches: Vec<Batch>) -> Vec<Batch> {
        batches.sort_by(|a, b| {
            a.expiry_date()
                .cmp(&b.expiry_date())
                .then(a.batch_id().cmp(&b.batch_id()))
        });
        batches
    }

    fn allocate(&self, batches: Vec<Batch>, quantity: Quantity) -> DomainResult<AllocationOutcome> {
        consume_in_order(self.sort_for_allocation(batches), quantity)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::OldestFirst
    }
}

// ============================================================================
// Newest-First Strategy
// ============================================================================

/// Consumes latest-expiring batches first.
///
/// Sort order: expiry date descending, ties broken by batch id descending.
#[derive(Debug, Clone, Default)]
pub struct NewestFirstStrategy;

impl NewestFirstStrategy {
    /// Creates a new newest-first strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AllocationStrategy for NewestFirstStrategy {
    fn sort_for_allocation(&self, mut batches: Vec<Batch>) -> Vec<Batch> {
        batches.sort_by(|a, b| {
            b.expiry_date()
                .cmp(&a.expiry_date())
                .then(b.batch_id().cmp(&a.batch_id()))
        });
        batches
    }

    fn allocate(&self, batches: Vec<Batch>, quantity: Quantity) -> DomainResult<AllocationOutcome> {
        consume_in_order(self.sort_for_allocation(batches), quantity)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::NewestFirst
    }
}

/// Returns the strategy implementation for a selector.
#[must_use]
pub fn strategy_for(kind: StrategyKind) -> Arc<dyn AllocationStrategy> {
    match kind {
        StrategyKind::OldestFirst => Arc::new(OldestFirstStrategy),
        StrategyKind::NewestFirst => Arc::new(NewestFirstStrategy),
    }
}
