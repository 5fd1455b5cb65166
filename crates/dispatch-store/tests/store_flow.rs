use dispatch_client::DispatchClient;
use dispatch_store::domain::bucket::Bucket;
use dispatch_store::domain::order::{OrderId, OrderStatus};
use dispatch_store::errors::FetchError;
use dispatch_store::store::OrderLifecycleStore;
use httpmock::prelude::*;

// End-to-end store flow over the real HTTP client against a mock server.
#[tokio::test]
async fn accept_flow_over_http() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(200).json_body(serde_json::json!({
            "incoming_orders": [
                { "id": 1, "items": ["Pizza"], "status": "Incoming" }
            ]
        }));
    });
    let accept = server.mock(|when, then| {
        when.method(POST).path("/api/orders/1/accept");
        then.status(200).json_body(serde_json::json!({ "ok": true }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = OrderLifecycleStore::new(client);

    let incoming = store.refresh(Bucket::Incoming).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].status, OrderStatus::Incoming);

    store.accept(&OrderId::from(1)).await.unwrap();
    accept.assert();

    let incoming = store.snapshot(Bucket::Incoming).await;
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].status, OrderStatus::Accepted);
}

#[tokio::test]
async fn advance_empties_the_accepted_bucket() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/accepted-orders");
        then.status(200).json_body(serde_json::json!({
            "accepted_orders": [
                { "id": 5, "items": ["Burger"], "delivery_address": "5 High St", "status": "Accepted" }
            ]
        }));
    });
    let advance = server.mock(|when, then| {
        when.method(POST).path("/api/orders/5/in-progress");
        then.status(200).json_body(serde_json::json!({ "ok": true }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = OrderLifecycleStore::new(client);

    store.refresh(Bucket::Accepted).await.unwrap();
    store.advance(&OrderId::from(5)).await.unwrap();
    advance.assert();
    assert!(store.snapshot(Bucket::Accepted).await.is_empty());
}

#[tokio::test]
async fn failed_refresh_reports_and_preserves() {
    let server = MockServer::start();
    let mut ok = server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(200).json_body(serde_json::json!({
            "incoming_orders": [
                { "id": 1, "items": ["Pizza"], "status": "Incoming" }
            ]
        }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = OrderLifecycleStore::new(client);
    store.refresh(Bucket::Incoming).await.unwrap();
    let before = store.snapshot(Bucket::Incoming).await;

    ok.delete();
    server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(500);
    });

    let err = store.refresh(Bucket::Incoming).await.unwrap_err();
    assert!(matches!(err, FetchError::Bucket { bucket: Bucket::Incoming, .. }));
    assert_eq!(store.snapshot(Bucket::Incoming).await, before);
}

#[tokio::test]
async fn history_is_fetched_on_demand() {
    let server = MockServer::start();
    let history = server.mock(|when, then| {
        when.method(GET).path("/api/orders/history");
        then.status(200).json_body(serde_json::json!({
            "orders": [
                { "id": 3, "items": ["Cola"], "status": "Completed" }
            ]
        }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = OrderLifecycleStore::new(client);

    let orders = store.history().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Completed);
    history.assert();
}
