//! # Allocation Engine
//!
//! The only component authorized to mutate batch quantities.
//!
//! The engine owns the reservation transaction: read candidates, compute
//! the allocation, write the updated batch set as one save. Concurrent
//! reservations against the same product serialize on a per-product lock;
//! different products never contend. Availability reads run lock-free and
//! may observe stale data, which is why [`AllocationEngine::reserve`]
//! re-validates sufficiency instead of trusting a prior check.
//!
//! Receipts are remembered per idempotency token for a bounded window, so
//! a caller that lost the response to a reservation can replay the same
//! token and get the recorded receipt back without stock being touched
//! twice.

use crate::application::error::{EngineError, EngineResult};
use crate::application::services::allocation_strategy::AllocationStrategy;
use crate::domain::entities::reservation::{InventorySnapshot, ReservationReceipt};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ProductId, Quantity, ReservationToken};
use crate::infrastructure::persistence::BatchRepository;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Configuration for the allocation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long a reservation receipt stays replayable by its token.
    pub replay_window: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            replay_window: Duration::from_secs(300),
        }
    }
}

/// A receipt remembered for idempotent replay.
#[derive(Debug, Clone)]
struct ReplayEntry {
    recorded_at: Instant,
    receipt: ReservationReceipt,
}

/// Orchestrates strategy selection, availability validation, batch
/// mutation, and persistence.
#[derive(Debug)]
pub struct AllocationEngine {
    batches: Arc<dyn BatchRepository>,
    strategy: Arc<dyn AllocationStrategy>,
    product_locks: DashMap<ProductId, Arc<Mutex<()>>>,
    replays: DashMap<ReservationToken, ReplayEntry>,
    config: EngineConfig,
}

impl AllocationEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(batches: Arc<dyn BatchRepository>, strategy: Arc<dyn AllocationStrategy>) -> Self {
        Self::with_config(batches, strategy, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(
        batches: Arc<dyn BatchRepository>,
        strategy: Arc<dyn AllocationStrategy>,
        config: EngineConfig,
    ) -> Self {
        Self {
            batches,
            strategy,
            product_locks: DashMap::new(),
            replays: DashMap::new(),
            config,
        }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the name of the active strategy.
    #[must_use]
    pub fn strategy_kind(&self) -> crate::domain::value_objects::StrategyKind {
        self.strategy.kind()
    }

    /// Returns the availability view for a product.
    ///
    /// Every batch record is reported, zero-quantity batches included
    /// (they stay visible for audit), sorted into the strategy's display
    /// order. This universe is deliberately wider than the reservation
    /// candidate set, which only sees batches with stock remaining.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the product has no batch records
    /// - [`EngineError::Repository`] if the batch store fails
    pub async fn availability(&self, product_id: ProductId) -> EngineResult<InventorySnapshot> {
        info!(product_id = %product_id, "fetching inventory");
        let batches = self.batches.list_for_product(product_id).await?;

        if batches.is_empty() {
            warn!(product_id = %product_id, "no inventory found");
            return Err(EngineError::NotFound(product_id));
        }

        let product_name = batches
            .first()
            .map(|b| b.product_name().to_string())
            .unwrap_or_default();
        let sorted = self.strategy.sort_for_allocation(batches);

        Ok(InventorySnapshot::new(product_id, product_name, sorted))
    }

    /// Reserves `quantity` units of a product under `token`.
    ///
    /// Candidates are the batches with stock remaining. The read, the
    /// allocation, and the write happen inside the product's critical
    /// section; the full updated batch set is persisted as one save, so
    /// either all affected batches change together or none do.
    ///
    /// Replaying a token within the replay window returns the recorded
    /// receipt without touching stock.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if no candidate batches exist
    /// - [`EngineError::InsufficientStock`] if candidates cannot cover the
    ///   request (never retried internally: retrying without new stock
    ///   cannot succeed)
    /// - [`EngineError::Repository`] if the write fails; the reservation
    ///   is not reported as success in that case
    pub async fn reserve(
        &self,
        product_id: ProductId,
        quantity: Quantity,
        token: ReservationToken,
    ) -> EngineResult<ReservationReceipt> {
        info!(product_id = %product_id, quantity = %quantity, token = %token, "reserving inventory");

        let lock = self
            .product_locks
            .entry(product_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Replay check inside the critical section: a duplicate racing the
        // original resolves to one allocation and one receipt.
        if let Some(receipt) = self.replayed(&token) {
            info!(token = %token, "replaying recorded reservation receipt");
            return Ok(receipt);
        }

        let candidates = self.batches.list_available_for_product(product_id).await?;
        if candidates.is_empty() {
            warn!(product_id = %product_id, "product not found or out of stock");
            return Err(EngineError::NotFound(product_id));
        }

        let available: Quantity = candidates.iter().map(|b| b.quantity()).sum();
        if available < quantity {
            warn!(
                requested = %quantity,
                available = %available,
                "insufficient inventory"
            );
            return Err(EngineError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        let outcome = self
            .strategy
            .allocate(candidates, quantity)
            .map_err(|e| match e {
                DomainError::Shortage {
                    requested,
                    available,
                } => EngineError::InsufficientStock {
                    requested,
                    available,
                },
                other => EngineError::Domain(other),
            })?;

        self.batches.save_all(&outcome.updated_batches).await?;

        let receipt = ReservationReceipt {
            token,
            product_id,
            quantity,
            consumed_batch_ids: outcome.consumed_batch_ids,
        };
        self.remember(token, receipt.clone());

        info!(
            product_id = %product_id,
            reserved_batch_ids = ?receipt.consumed_batch_ids,
            "inventory reserved"
        );
        Ok(receipt)
    }

    /// Looks up a replayable receipt, evicting expired entries.
    fn replayed(&self, token: &ReservationToken) -> Option<ReservationReceipt> {
        let window = self.config.replay_window;
        self.replays
            .get(token)
            .filter(|entry| entry.recorded_at.elapsed() <= window)
            .map(|entry| entry.receipt.clone())
    }

    /// Records a receipt for replay and drops entries past the window.
    fn remember(&self, token: ReservationToken, receipt: ReservationReceipt) {
        let window = self.config.replay_window;
        self.replays.retain(|_, entry| entry.recorded_at.elapsed() <= window);
        self.replays.insert(
            token,
            ReplayEntry {
                recorded_at: Instant::now(),
                receipt,
            },
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::allocation_strategy::{
        NewestFirstStrategy, OldestFirstStrategy,
    };
    use crate::domain::entities::batch::Batch;
    use crate::domain::value_objects::BatchId;
    use crate::infrastructure::persistence::in_memory::InMemoryBatchRepository;
    use chrono::NaiveDate;

    fn make_batch(id: u64, product: u64, qty: u64, expiry: (i32, u32, u32)) -> Batch {
        Batch::new(
            BatchId::new(id),
            ProductId::new(product),
            "Smoked Salmon",
            Quantity::new(qty),
            NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2).unwrap(),
        )
        .unwrap()
    }

    async fn engine_with(batches: Vec<Batch>) -> (AllocationEngine, Arc<InMemoryBatchRepository>) {
        let repo = Arc::new(InMemoryBatchRepository::new());
        repo.seed(batches).await;
        let engine = AllocationEngine::new(repo.clone(), Arc::new(OldestFirstStrategy));
        (engine, repo)
    }

    mod availability {
        use super::*;

        #[tokio::test]
        async fn reports_sorted_batches_and_total() {
            let (engine, _) = engine_with(vec![
                make_batch(2, 1001, 52, (2026, 5, 30)),
                make_batch(5, 1001, 39, (2026, 3, 31)),
            ])
            .await;

            let snapshot = engine.availability(ProductId::new(1001)).await.unwrap();
            assert_eq!(snapshot.product_name, "Smoked Salmon");
            assert_eq!(snapshot.total_available, Quantity::new(91));
            assert_eq!(snapshot.batches[0].batch_id(), BatchId::new(5));
        }

        #[tokio::test]
        async fn unknown_product_is_not_found() {
            let (engine, _) = engine_with(vec![]).await;
            let result = engine.availability(ProductId::new(9999)).await;
            assert!(matches!(result, Err(EngineError::NotFound(_))));
        }

        #[tokio::test]
        async fn includes_zero_quantity_batches() {
            let (engine, _) = engine_with(vec![
                make_batch(1, 1001, 0, (2026, 1, 31)),
                make_batch(2, 1001, 20, (2026, 3, 15)),
            ])
            .await;

            let snapshot = engine.availability(ProductId::new(1001)).await.unwrap();
            assert_eq!(snapshot.batches.len(), 2);
            assert_eq!(snapshot.total_available, Quantity::new(20));
        }

        #[tokio::test]
        async fn is_idempotent_without_intervening_reservation() {
            let (engine, _) = engine_with(vec![make_batch(9, 1002, 29, (2026, 5, 31))]).await;

            let first = engine.availability(ProductId::new(1002)).await.unwrap();
            let second = engine.availability(ProductId::new(1002)).await.unwrap();
            assert_eq!(first.total_available, second.total_available);
            assert_eq!(first.batches, second.batches);
        }

        #[tokio::test]
        async fn newest_first_reverses_display_order() {
            let repo = Arc::new(InMemoryBatchRepository::new());
            repo.seed(vec![
                make_batch(5, 1001, 39, (2026, 3, 31)),
                make_batch(2, 1001, 52, (2026, 5, 30)),
            ])
            .await;
            let engine = AllocationEngine::new(repo, Arc::new(NewestFirstStrategy));

            let snapshot = engine.availability(ProductId::new(1001)).await.unwrap();
            assert_eq!(snapshot.batches[0].batch_id(), BatchId::new(2));
        }
    }

    mod reserve {
        use super::*;

        #[tokio::test]
        async fn persists_decremented_batches() {
            let (engine, repo) = engine_with(vec![make_batch(9, 1002, 29, (2026, 5, 31))]).await;

            let receipt = engine
                .reserve(
                    ProductId::new(1002),
                    Quantity::new(3),
                    ReservationToken::new_v4(),
                )
                .await
                .unwrap();

            assert_eq!(receipt.consumed_batch_ids, vec![BatchId::new(9)]);
            let stored = repo.list_for_product(ProductId::new(1002)).await.unwrap();
            assert_eq!(stored[0].quantity(), Quantity::new(26));
        }

        #[tokio::test]
        async fn consumed_order_follows_strategy() {
            let (engine, repo) = engine_with(vec![
                make_batch(5, 1001, 39, (2026, 3, 31)),
                make_batch(7, 1001, 40, (2026, 4, 24)),
                make_batch(2, 1001, 52, (2026, 5, 30)),
            ])
            .await;

            let receipt = engine
                .reserve(
                    ProductId::new(1001),
                    Quantity::new(50),
                    ReservationToken::new_v4(),
                )
                .await
                .unwrap();

            assert_eq!(
                receipt.consumed_batch_ids,
                vec![BatchId::new(5), BatchId::new(7)]
            );
            let stored = repo.list_for_product(ProductId::new(1001)).await.unwrap();
            let by_id = |id: u64| {
                stored
                    .iter()
                    .find(|b| b.batch_id() == BatchId::new(id))
                    .unwrap()
                    .quantity()
            };
            assert_eq!(by_id(5), Quantity::zero());
            assert_eq!(by_id(7), Quantity::new(29));
            assert_eq!(by_id(2), Quantity::new(52));
        }

        #[tokio::test]
        async fn insufficient_stock_leaves_batches_untouched() {
            let (engine, repo) = engine_with(vec![make_batch(9, 1002, 29, (2026, 5, 31))]).await;

            let result = engine
                .reserve(
                    ProductId::new(1002),
                    Quantity::new(100),
                    ReservationToken::new_v4(),
                )
                .await;

            assert!(matches!(
                result,
                Err(EngineError::InsufficientStock {
                    requested,
                    available,
                }) if requested == Quantity::new(100) && available == Quantity::new(29)
            ));
            let stored = repo.list_for_product(ProductId::new(1002)).await.unwrap();
            assert_eq!(stored[0].quantity(), Quantity::new(29));
        }

        #[tokio::test]
        async fn unknown_product_is_not_found() {
            let (engine, _) = engine_with(vec![]).await;
            let result = engine
                .reserve(
                    ProductId::new(9999),
                    Quantity::new(1),
                    ReservationToken::new_v4(),
                )
                .await;
            assert!(matches!(result, Err(EngineError::NotFound(_))));
        }

        #[tokio::test]
        async fn all_batches_empty_is_not_found_to_reserve() {
            // The availability view still sees the product; the reservation
            // candidate universe does not.
            let (engine, _) = engine_with(vec![make_batch(1, 1001, 0, (2026, 1, 31))]).await;

            assert!(engine.availability(ProductId::new(1001)).await.is_ok());
            let result = engine
                .reserve(
                    ProductId::new(1001),
                    Quantity::new(1),
                    ReservationToken::new_v4(),
                )
                .await;
            assert!(matches!(result, Err(EngineError::NotFound(_))));
        }

        #[tokio::test]
        async fn duplicate_token_replays_without_double_consuming() {
            let (engine, repo) = engine_with(vec![make_batch(9, 1002, 29, (2026, 5, 31))]).await;
            let token = ReservationToken::new_v4();

            let first = engine
                .reserve(ProductId::new(1002), Quantity::new(3), token)
                .await
                .unwrap();
            let second = engine
                .reserve(ProductId::new(1002), Quantity::new(3), token)
                .await
                .unwrap();

            assert_eq!(first, second);
            let stored = repo.list_for_product(ProductId::new(1002)).await.unwrap();
            assert_eq!(stored[0].quantity(), Quantity::new(26));
        }

        #[tokio::test]
        async fn expired_token_is_not_replayed() {
            let repo = Arc::new(InMemoryBatchRepository::new());
            repo.seed(vec![make_batch(9, 1002, 29, (2026, 5, 31))]).await;
            let engine = AllocationEngine::with_config(
                repo.clone(),
                Arc::new(OldestFirstStrategy),
                EngineConfig {
                    replay_window: Duration::ZERO,
                },
            );
            let token = ReservationToken::new_v4();

            engine
                .reserve(ProductId::new(1002), Quantity::new(3), token)
                .await
                .unwrap();
            engine
                .reserve(ProductId::new(1002), Quantity::new(3), token)
                .await
                .unwrap();

            let stored = repo.list_for_product(ProductId::new(1002)).await.unwrap();
            assert_eq!(stored[0].quantity(), Quantity::new(23));
        }

        #[tokio::test]
        async fn zero_quantity_reserve_consumes_nothing() {
            let (engine, repo) = engine_with(vec![make_batch(9, 1002, 29, (2026, 5, 31))]).await;

            let receipt = engine
                .reserve(
                    ProductId::new(1002),
                    Quantity::zero(),
                    ReservationToken::new_v4(),
                )
                .await
                .unwrap();

            assert!(receipt.consumed_batch_ids.is_empty());
            let stored = repo.list_for_product(ProductId::new(1002)).await.unwrap();
            assert_eq!(stored[0].quantity(), Quantity::new(29));
        }
    }
}
