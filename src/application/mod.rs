//! # Application Layer
//!
//! Use-case orchestration over the domain: the allocation engine, the
//! consumption strategies, and the order placement coordinator, plus
//! their error taxonomies.

pub mod error;
pub mod services;

pub use error::{EngineError, EngineResult, PlacementError, PlacementResult};
