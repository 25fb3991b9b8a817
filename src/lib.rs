//! # stockroom
//!
//! Perishable-goods batch allocation and order placement.
//!
//! Stock lives in dated batches per product. A pluggable
//! [`AllocationStrategy`](application::services::allocation_strategy::AllocationStrategy)
//! decides consumption order (oldest-expiry-first by default), the
//! [`AllocationEngine`](application::services::allocation_engine::AllocationEngine)
//! owns the reservation transaction, and the
//! [`OrderPlacementCoordinator`](application::services::order_placement::OrderPlacementCoordinator)
//! sequences a remote availability check and a remote reservation into one
//! order placement — surfacing, rather than hiding, the failure modes of
//! that two-step protocol.
//!
//! ## Layers
//!
//! - [`domain`]: entities, value objects, domain errors
//! - [`application`]: strategies, the engine, the coordinator
//! - [`infrastructure`]: repositories and the remote inventory client
//! - [`api`]: thin REST adapter
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use stockroom::application::services::allocation_engine::AllocationEngine;
//! use stockroom::application::services::allocation_strategy::OldestFirstStrategy;
//! use stockroom::domain::entities::batch::Batch;
//! use stockroom::domain::value_objects::{BatchId, ProductId, Quantity, ReservationToken};
//! use stockroom::infrastructure::persistence::in_memory::InMemoryBatchRepository;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repo = Arc::new(InMemoryBatchRepository::new());
//! repo.seed([Batch::new(
//!     BatchId::new(9),
//!     ProductId::new(1002),
//!     "Smoked Salmon",
//!     Quantity::new(29),
//!     NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
//! )
//! .unwrap()])
//! .await;
//!
//! let engine = AllocationEngine::new(repo, Arc::new(OldestFirstStrategy));
//! let receipt = engine
//!     .reserve(ProductId::new(1002), Quantity::new(3), ReservationToken::new_v4())
//!     .await
//!     .unwrap();
//! assert_eq!(receipt.consumed_batch_ids, vec![BatchId::new(9)]);
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;
