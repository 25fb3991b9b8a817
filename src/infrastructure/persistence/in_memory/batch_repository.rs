//! # In-Memory Batch Repository
//!
//! In-memory implementation of [`BatchRepository`] for tests and local
//! wiring.
//!
//! Uses a thread-safe `HashMap` keyed by product. Listing operations sort
//! by expiry date (ties by batch id) to match the storage contract.

use crate::domain::entities::batch::Batch;
use crate::domain::value_objects::ProductId;
use crate::infrastructure::persistence::traits::{
    BatchRepository, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`BatchRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBatchRepository {
    storage: Arc<RwLock<HashMap<ProductId, Vec<Batch>>>>,
}

impl InMemoryBatchRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds batch records, replacing any existing record with the same
    /// batch id under the same product.
    pub async fn seed(&self, batches: impl IntoIterator<Item = Batch>) {
        let mut storage = self.storage.write().await;
        for batch in batches {
            let records = storage.entry(batch.product_id()).or_default();
            match records
                .iter_mut()
                .find(|b| b.batch_id() == batch.batch_id())
            {
                Some(existing) => *existing = batch,
                None => records.push(batch),
            }
        }
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }

    fn sorted_by_expiry(mut batches: Vec<Batch>) -> Vec<Batch> {
        batches.sort_by(|a, b| {
            a.expiry_date()
                .cmp(&b.expiry_date())
                .then(a.batch_id().cmp(&b.batch_id()))
        });
        batches
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn list_for_product(&self, product_id: ProductId) -> RepositoryResult<Vec<Batch>> {
        let storage = self.storage.read().await;
        let batches = storage.get(&product_id).cloned().unwrap_or_default();
        Ok(Self::sorted_by_expiry(batches))
    }

    async fn list_available_for_product(
        &self,
        product_id: ProductId,
    ) -> RepositoryResult<Vec<Batch>> {
        let storage = self.storage.read().await;
        let batches: Vec<Batch> = storage
            .get(&product_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|b| b.quantity().is_positive())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self::sorted_by_expiry(batches))
    }

    async fn save_all(&self, batches: &[Batch]) -> RepositoryResult<()> {
        // Single write guard over the whole sequence: the all-or-nothing
        // contract of the port.
        let mut storage = self.storage.write().await;
        for batch in batches {
            let records = storage.entry(batch.product_id()).or_default();
            match records
                .iter_mut()
                .find(|b| b.batch_id() == batch.batch_id())
            {
                Some(existing) => *existing = batch.clone(),
                None => records.push(batch.clone()),
            }
        }
        Ok(())
    }
}
