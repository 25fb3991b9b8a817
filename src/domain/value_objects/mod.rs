//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ProductId`], [`BatchId`], [`OrderId`]: integer-backed identifiers
//! - [`ReservationToken`]: UUID idempotency token for reservations
//!
//! ## Numeric Types
//!
//! - [`Quantity`]: non-negative unit count with checked arithmetic
//!
//! ## Selectors
//!
//! - [`StrategyKind`]: closed enumeration of consumption policies

pub mod ids;
pub mod quantity;
pub mod strategy_kind;

pub use ids::{BatchId, OrderId, ProductId, ReservationToken};
pub use quantity::{ArithmeticError, ArithmeticResult, Quantity};
pub use strategy_kind::{ParseEnumError, StrategyKind};
