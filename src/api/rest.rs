//! # REST Adapter
//!
//! Thin axum surface over the allocation engine and the order placement
//! coordinator. Routing and serialization only; every decision lives in
//! the application layer.
//!
//! ## Routes
//!
//! - `GET /inventory/{product_id}` — availability view, `404` for unknown
//!   products
//! - `POST /inventory/reserve` — reservation, `422` on insufficient
//!   stock, `400` on unknown products or bad input
//! - `POST /orders` — order placement via the coordinator

use crate::application::error::{EngineError, PlacementError};
use crate::application::services::allocation_engine::AllocationEngine;
use crate::application::services::order_placement::{
    OrderPlacementCoordinator, OrderPlacementRequest,
};
use crate::domain::value_objects::{BatchId, OrderId, ProductId, ReservationToken};
use crate::infrastructure::remote::contracts::{
    AvailabilityResponse, BatchSummary, ReserveRequest, ReserveResponse,
};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state behind the REST surface.
#[derive(Debug)]
pub struct ApiState {
    /// The allocation engine serving both inventory surfaces.
    pub engine: Arc<AllocationEngine>,
    /// The order placement coordinator.
    pub coordinator: Arc<OrderPlacementCoordinator>,
}

/// Error body returned on every failure status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error description.
    pub error: String,
}

/// Order placement answer, mirroring the order wire contract.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Assigned order identifier.
    pub order_id: Option<OrderId>,
    /// Ordered product.
    pub product_id: ProductId,
    /// Product display name.
    pub product_name: String,
    /// Ordered quantity.
    pub quantity: u64,
    /// Lifecycle state.
    pub status: String,
    /// Batches the reservation drew from.
    pub reserved_from_batch_ids: Vec<BatchId>,
    /// Confirmation message.
    pub message: String,
}

/// Builds the router over the given state.
#[must_use]
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/inventory/{product_id}", get(get_availability))
        .route("/inventory/reserve", post(reserve))
        .route("/orders", post(place_order))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        axum::Json(ErrorBody {
            error: error.into(),
        }),
    )
        .into_response()
}

fn engine_error_response(err: &EngineError, not_found_status: StatusCode) -> Response {
    let status = match err {
        EngineError::NotFound(_) => not_found_status,
        EngineError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Domain(_) => StatusCode::BAD_REQUEST,
        EngineError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

fn placement_error_response(err: &PlacementError) -> Response {
    let status = match err {
        PlacementError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        PlacementError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        PlacementError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PlacementError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PlacementError::ReservationFailed(_) => StatusCode::BAD_GATEWAY,
        PlacementError::AmbiguousOutcome { .. } => StatusCode::GATEWAY_TIMEOUT,
        PlacementError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(product_id): Path<u64>,
) -> Response {
    match state.engine.availability(ProductId::new(product_id)).await {
        Ok(snapshot) => {
            let body = AvailabilityResponse {
                product_id: snapshot.product_id,
                product_name: snapshot.product_name.clone(),
                batches: snapshot
                    .batches
                    .iter()
                    .map(|b| BatchSummary {
                        batch_id: b.batch_id(),
                        quantity: b.quantity(),
                        expiry_date: b.expiry_date(),
                    })
                    .collect(),
            };
            axum::Json(body).into_response()
        }
        Err(err) => engine_error_response(&err, StatusCode::NOT_FOUND),
    }
}

async fn reserve(
    State(state): State<Arc<ApiState>>,
    axum::Json(request): axum::Json<ReserveRequest>,
) -> Response {
    // Mint a token when the caller supplied none; replay then only works
    // for callers that did.
    let token = request
        .idempotency_key
        .unwrap_or_else(ReservationToken::new_v4);

    match state
        .engine
        .reserve(request.product_id, request.quantity, token)
        .await
    {
        Ok(receipt) => axum::Json(ReserveResponse {
            success: true,
            message: "Successfully reserved inventory".to_string(),
            reserved_batch_ids: receipt.consumed_batch_ids,
        })
        .into_response(),
        // The reserve surface answers 400 for unknown products; only the
        // availability surface uses 404.
        Err(err) => engine_error_response(&err, StatusCode::BAD_REQUEST),
    }
}

async fn place_order(
    State(state): State<Arc<ApiState>>,
    axum::Json(request): axum::Json<OrderPlacementRequest>,
) -> Response {
    match state.coordinator.place_order(request).await {
        Ok(confirmation) => {
            let order = &confirmation.order;
            let body = OrderResponse {
                order_id: order.order_id(),
                product_id: order.product_id(),
                product_name: order.product_name().to_string(),
                quantity: order.quantity().get(),
                status: order.status().to_string(),
                reserved_from_batch_ids: order.reserved_batch_ids().to_vec(),
                message: confirmation.message,
            };
            axum::Json(body).into_response()
        }
        Err(err) => placement_error_response(&err),
    }
}
