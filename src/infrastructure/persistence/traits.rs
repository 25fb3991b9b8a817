//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! The allocation engine and the order coordinator only see these traits;
//! implementations can use a relational store, a key-value store, or the
//! in-memory versions shipped for tests.
//!
//! # Available Repositories
//!
//! - [`BatchRepository`]: the batch store, keyed by product
//! - [`OrderRepository`]: durable order records

use crate::domain::entities::batch::Batch;
use crate::domain::entities::order::Order;
use crate::domain::value_objects::ProductId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Backing store rejected or lost the write.
    #[error("storage error: {0}")]
    Storage(String),

    /// Backing store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Durable mapping from product to its batch records.
///
/// Listing operations return batches ordered by expiry date ascending, the
/// storage-level default the strategies re-sort from.
#[async_trait]
pub trait BatchRepository: Send + Sync + fmt::Debug {
    /// Lists every batch record for a product, zero-quantity records
    /// included, ordered by expiry date ascending.
    async fn list_for_product(&self, product_id: ProductId) -> RepositoryResult<Vec<Batch>>;

    /// Lists the batches with stock remaining (`quantity > 0`) for a
    /// product, ordered by expiry date ascending.
    ///
    /// This is the reservation candidate universe; it is deliberately
    /// narrower than [`BatchRepository::list_for_product`].
    async fn list_available_for_product(
        &self,
        product_id: ProductId,
    ) -> RepositoryResult<Vec<Batch>>;

    /// Persists the given batch set as one write.
    ///
    /// The whole sequence is durably applied or the call fails; no partial
    /// application is observable.
    async fn save_all(&self, batches: &[Batch]) -> RepositoryResult<()>;
}

/// Durable order records.
#[async_trait]
pub trait OrderRepository: Send + Sync + fmt::Debug {
    /// Persists an order, assigning its identifier.
    async fn save(&self, order: Order) -> RepositoryResult<Order>;
}
