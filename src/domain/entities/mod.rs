//! # Domain Entities
//!
//! Core entities of the batch allocation domain.
//!
//! - [`batch::Batch`]: a dated stock lot for one product
//! - [`order::Order`]: an order recorded against a confirmed reservation
//! - [`reservation`]: allocation outcomes, receipts, and availability
//!   snapshots

pub mod batch;
pub mod order;
pub mod reservation;

pub use batch::Batch;
pub use order::{Order, OrderStatus};
pub use reservation::{AllocationOutcome, InventorySnapshot, ReservationReceipt};
