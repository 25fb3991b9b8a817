//! End-to-end order placement scenarios.
//!
//! The coordinator talks to a mocked inventory service over real HTTP, so
//! these tests exercise the wire contracts, the status mapping, and the
//! failure taxonomy of the two-step protocol. The last test wires the
//! crate's own REST surface as the upstream instead of a mock.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockroom::application::error::PlacementError;
use stockroom::application::services::allocation_engine::AllocationEngine;
use stockroom::application::services::allocation_strategy::OldestFirstStrategy;
use stockroom::application::services::order_placement::{
    OrderPlacementCoordinator, OrderPlacementRequest,
};
use stockroom::domain::entities::batch::Batch;
use stockroom::domain::entities::order::OrderStatus;
use stockroom::domain::value_objects::{BatchId, ProductId, Quantity};
use stockroom::infrastructure::persistence::in_memory::{
    InMemoryBatchRepository, InMemoryOrderRepository,
};
use stockroom::infrastructure::remote::http_client::HttpInventoryClient;

fn salmon_inventory_body() -> serde_json::Value {
    json!({
        "productId": 1002,
        "productName": "Smoked Salmon",
        "batches": [
            {"batchId": 9, "quantity": 29, "expiryDate": "2026-05-31"}
        ]
    })
}

fn coordinator_against(
    server_uri: &str,
    timeout_ms: u64,
) -> (OrderPlacementCoordinator, Arc<InMemoryOrderRepository>) {
    let client = Arc::new(HttpInventoryClient::new(server_uri, timeout_ms).unwrap());
    let orders = Arc::new(InMemoryOrderRepository::new());
    (
        OrderPlacementCoordinator::new(client, orders.clone()),
        orders,
    )
}

fn request(quantity: u64) -> OrderPlacementRequest {
    OrderPlacementRequest {
        product_id: ProductId::new(1002),
        quantity: Quantity::new(quantity),
    }
}

#[tokio::test]
async fn placing_an_order_records_it_with_the_reserved_batches() {
    stockroom::observability::init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/1002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(salmon_inventory_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inventory/reserve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Successfully reserved inventory",
            "reservedBatchIds": [9]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (coordinator, orders) = coordinator_against(&server.uri(), 5000);
    let confirmation = coordinator.place_order(request(3)).await.unwrap();

    assert_eq!(confirmation.order.status(), OrderStatus::Placed);
    assert_eq!(confirmation.order.product_name(), "Smoked Salmon");
    assert_eq!(
        confirmation.order.reserved_batch_ids(),
        &[BatchId::new(9)]
    );
    assert!(confirmation.order.order_id().is_some());
    assert_eq!(orders.count().await, 1);
}

#[tokio::test]
async fn insufficient_stock_fails_without_touching_reserve() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/1002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(salmon_inventory_body()))
        .mount(&server)
        .await;
    // The reserve surface must never be called.
    Mock::given(method("POST"))
        .and(path("/inventory/reserve"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (coordinator, orders) = coordinator_against(&server.uri(), 5000);
    let err = coordinator.place_order(request(100)).await.unwrap_err();

    assert!(matches!(
        err,
        PlacementError::InsufficientStock { requested, available }
            if requested == Quantity::new(100) && available == Quantity::new(29)
    ));
    assert_eq!(orders.count().await, 0);
}

#[tokio::test]
async fn unknown_product_fails_without_touching_reserve() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/9999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inventory/reserve"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (coordinator, orders) = coordinator_against(&server.uri(), 5000);
    let err = coordinator
        .place_order(OrderPlacementRequest {
            product_id: ProductId::new(9999),
            quantity: Quantity::new(3),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::ProductNotFound(id) if id == ProductId::new(9999)));
    assert_eq!(orders.count().await, 0);
}

#[tokio::test]
async fn rejected_reservation_body_fails_the_placement() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/1002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(salmon_inventory_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inventory/reserve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "reservation rejected"
        })))
        .mount(&server)
        .await;

    let (coordinator, orders) = coordinator_against(&server.uri(), 5000);
    let err = coordinator.place_order(request(3)).await.unwrap_err();

    assert!(matches!(err, PlacementError::ReservationFailed(_)));
    assert!(!err.requires_reconciliation());
    assert_eq!(orders.count().await, 0);
}

#[tokio::test]
async fn reserve_server_error_fails_the_placement() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/1002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(salmon_inventory_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inventory/reserve"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (coordinator, orders) = coordinator_against(&server.uri(), 5000);
    let err = coordinator.place_order(request(3)).await.unwrap_err();

    assert!(matches!(err, PlacementError::ReservationFailed(_)));
    assert_eq!(orders.count().await, 0);
}

#[tokio::test]
async fn reserve_timeout_is_an_ambiguous_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/1002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(salmon_inventory_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inventory/reserve"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({
                    "success": true,
                    "message": "Successfully reserved inventory",
                    "reservedBatchIds": [9]
                })),
        )
        .mount(&server)
        .await;

    // Client timeout well below the mocked delay.
    let (coordinator, orders) = coordinator_against(&server.uri(), 250);
    let err = coordinator.place_order(request(3)).await.unwrap_err();

    assert!(matches!(err, PlacementError::AmbiguousOutcome { .. }));
    assert!(err.requires_reconciliation());
    assert_eq!(orders.count().await, 0);
}

#[tokio::test]
async fn unreachable_inventory_service_is_retryable() {
    // Nothing listens on this port.
    let (coordinator, orders) = coordinator_against("http://127.0.0.1:9", 500);
    let err = coordinator.place_order(request(3)).await.unwrap_err();

    assert!(matches!(err, PlacementError::UpstreamUnavailable(_)));
    assert!(err.is_retryable());
    assert_eq!(orders.count().await, 0);
}

/// Full loop: the crate's own REST surface serves as the upstream
/// inventory service, so remaining stock can be observed after placement.
#[tokio::test]
async fn placement_against_own_rest_surface_decrements_stock() {
    use stockroom::api::rest::{ApiState, router};

    let repo = Arc::new(InMemoryBatchRepository::new());
    repo.seed([Batch::new(
        BatchId::new(9),
        ProductId::new(1002),
        "Smoked Salmon",
        Quantity::new(29),
        NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
    )
    .unwrap()])
    .await;
    let engine = Arc::new(AllocationEngine::new(
        repo.clone(),
        Arc::new(OldestFirstStrategy),
    ));

    // The served coordinator is unused by these requests; wire it against
    // the same server address once known.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let serving_client = Arc::new(HttpInventoryClient::new(&base_url, 5000).unwrap());
    let state = Arc::new(ApiState {
        engine: engine.clone(),
        coordinator: Arc::new(OrderPlacementCoordinator::new(
            serving_client,
            Arc::new(InMemoryOrderRepository::new()),
        )),
    });
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    let (coordinator, orders) = coordinator_against(&base_url, 5000);
    let confirmation = coordinator.place_order(request(3)).await.unwrap();

    assert_eq!(
        confirmation.order.reserved_batch_ids(),
        &[BatchId::new(9)]
    );
    assert_eq!(orders.count().await, 1);

    let snapshot = engine.availability(ProductId::new(1002)).await.unwrap();
    assert_eq!(snapshot.total_available, Quantity::new(26));

    // A second, oversized request leaves stock untouched.
    let err = coordinator.place_order(request(100)).await.unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientStock { .. }));
    let snapshot = engine.availability(ProductId::new(1002)).await.unwrap();
    assert_eq!(snapshot.total_available, Quantity::new(26));
}
