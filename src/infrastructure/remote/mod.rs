//! # Remote Boundary
//!
//! The network boundary between the order placement coordinator and the
//! allocation engine.
//!
//! - [`traits::InventoryClient`]: the port the coordinator consumes
//! - [`http_client::HttpInventoryClient`]: reqwest implementation
//! - [`contracts`]: wire request/response bodies
//! - [`error::ClientError`]: taxonomy separating timeouts (outcome
//!   unknown) from connection failures (request never sent)

pub mod contracts;
pub mod error;
pub mod http_client;
pub mod traits;

pub use contracts::{AvailabilityResponse, BatchSummary, ReserveRequest, ReserveResponse};
pub use error::{ClientError, ClientResult};
pub use http_client::HttpInventoryClient;
pub use traits::InventoryClient;
