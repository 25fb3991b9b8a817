//! # Inventory Client Port
//!
//! The network boundary the order placement coordinator talks through.
//! The production implementation is HTTP ([`super::http_client`]); tests
//! substitute their own.

use crate::domain::value_objects::ProductId;
use crate::infrastructure::remote::contracts::{
    AvailabilityResponse, ReserveRequest, ReserveResponse,
};
use crate::infrastructure::remote::error::ClientResult;
use async_trait::async_trait;
use std::fmt;

/// Remote client for the allocation engine's two surfaces.
#[async_trait]
pub trait InventoryClient: Send + Sync + fmt::Debug {
    /// Fetches the availability view for a product.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`](crate::infrastructure::remote::error::ClientError::NotFound)
    ///   when the product has no inventory upstream
    /// - [`ClientError::Timeout`](crate::infrastructure::remote::error::ClientError::Timeout) /
    ///   [`ClientError::Connection`](crate::infrastructure::remote::error::ClientError::Connection)
    ///   on transport failures
    async fn fetch_availability(
        &self,
        product_id: ProductId,
    ) -> ClientResult<AvailabilityResponse>;

    /// Requests a reservation.
    ///
    /// # Errors
    ///
    /// Transport failures as for
    /// [`InventoryClient::fetch_availability`]; an HTTP 422 maps to
    /// [`ClientError::InsufficientStock`](crate::infrastructure::remote::error::ClientError::InsufficientStock).
    /// A `Ok` response with `success == false` is returned as-is; callers
    /// decide how to treat it.
    async fn reserve(&self, request: &ReserveRequest) -> ClientResult<ReserveResponse>;
}
