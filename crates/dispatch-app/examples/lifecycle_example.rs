///  To run :
///  cargo r --example lifecycle_example
use std::sync::Arc;
use std::time::Duration;

use dispatch_client::DispatchClient;
use dispatch_store::config::PollIntervals;
use dispatch_store::poller::BucketPoller;
use dispatch_store::store::OrderLifecycleStore;
use dispatch_types::domain::bucket::Bucket;
use dispatch_types::domain::order::OrderId;
use httpmock::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stand in for the delivery server with a mock so the example runs
    // anywhere.
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(200).json_body(serde_json::json!({
            "incoming_orders": [
                { "id": 1, "items": ["Pizza", "Cola"], "delivery_address": "5 High St", "status": "Incoming" },
                { "id": 2, "items": ["Burger"], "status": "Incoming" }
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/orders/1/accept");
        then.status(200).json_body(serde_json::json!({ "ok": true }));
    });

    let client = DispatchClient::builder(&server.base_url())?
        .with_timeout(Duration::from_secs(2))
        .build()?;
    let store = Arc::new(OrderLifecycleStore::new(client));

    let mut poller = BucketPoller::new(Arc::clone(&store), PollIntervals::default());
    poller.start(Bucket::Incoming);
    tokio::time::sleep(Duration::from_millis(100)).await;

    for order in store.snapshot(Bucket::Incoming).await {
        println!(
            "incoming order {} -> {:?} ({}) [{}]",
            order.id,
            order.status,
            order.delivery_address_label(),
            order.items.join(", ")
        );
    }

    store.accept(&OrderId::from(1)).await?;
    let incoming = store.snapshot(Bucket::Incoming).await;
    println!(
        "after accept: order {} shows {:?} until the accepted screen polls it in",
        incoming[0].id, incoming[0].status
    );

    poller.stop_all();
    Ok(())
}
