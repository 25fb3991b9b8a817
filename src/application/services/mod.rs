//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`allocation_strategy`]: batch consumption policies
//! - [`allocation_engine::AllocationEngine`]: the reservation transaction
//! - [`order_placement::OrderPlacementCoordinator`]: the two-step
//!   check-then-reserve protocol

pub mod allocation_engine;
pub mod allocation_strategy;
pub mod order_placement;

pub use allocation_engine::{AllocationEngine, EngineConfig};
pub use allocation_strategy::{
    AllocationStrategy, NewestFirstStrategy, OldestFirstStrategy, strategy_for,
};
pub use order_placement::{
    OrderPlacementCoordinator, OrderPlacementRequest, PlacementConfirmation,
};
