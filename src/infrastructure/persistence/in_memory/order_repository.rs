//! # In-Memory Order Repository
//!
//! In-memory implementation of [`OrderRepository`] for tests and local
//! wiring. Identifiers are assigned from a monotonic counter.

use crate::domain::entities::order::Order;
use crate::domain::value_objects::OrderId;
use crate::infrastructure::persistence::traits::{OrderRepository, RepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// In-memory implementation of [`OrderRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    storage: Arc<RwLock<Vec<Order>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all stored orders.
    pub async fn all(&self) -> Vec<Order> {
        self.storage.read().await.clone()
    }

    /// Returns the number of stored orders.
    pub async fn count(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: Order) -> RepositoryResult<Order> {
        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let saved = order.with_id(id);
        self.storage.write().await.push(saved.clone());
        Ok(saved)
    }
}
