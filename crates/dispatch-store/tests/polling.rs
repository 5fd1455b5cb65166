use std::sync::Arc;
use std::time::Duration;

use dispatch_client::DispatchClient;
use dispatch_store::config::PollIntervals;
use dispatch_store::domain::bucket::Bucket;
use dispatch_store::poller::BucketPoller;
use dispatch_store::store::OrderLifecycleStore;
use httpmock::prelude::*;

fn fast_intervals(period: Duration) -> PollIntervals {
    PollIntervals {
        incoming: Some(period),
        accepted: None,
        in_progress: None,
        completed: None,
    }
}

#[tokio::test]
async fn poller_refreshes_until_stopped() {
    let server = MockServer::start();
    let incoming = server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(200).json_body(serde_json::json!({
            "incoming_orders": [
                { "id": 1, "items": ["Pizza"], "status": "Incoming" }
            ]
        }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = Arc::new(OrderLifecycleStore::new(client));
    let mut poller = BucketPoller::new(
        Arc::clone(&store),
        fast_intervals(Duration::from_millis(25)),
    );

    poller.start(Bucket::Incoming);
    assert!(poller.is_polling(Bucket::Incoming));
    // Buckets without an interval must not start.
    poller.start(Bucket::Completed);
    assert!(!poller.is_polling(Bucket::Completed));

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(store.snapshot(Bucket::Incoming).await.len(), 1);
    assert!(incoming.hits() >= 2);

    poller.stop(Bucket::Incoming);
    assert!(!poller.is_polling(Bucket::Incoming));
    let hits_at_stop = incoming.hits();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(incoming.hits(), hits_at_stop);
}

// A poll slower than its interval must queue at most one follow-up, not
// stack a request per missed tick.
#[tokio::test]
async fn slow_endpoint_does_not_stack_requests() {
    let server = MockServer::start();
    let incoming = server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(200)
            .delay(Duration::from_millis(80))
            .json_body(serde_json::json!({ "incoming_orders": [] }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = Arc::new(OrderLifecycleStore::new(client));
    let mut poller = BucketPoller::new(
        Arc::clone(&store),
        fast_intervals(Duration::from_millis(10)),
    );

    poller.start(Bucket::Incoming);
    tokio::time::sleep(Duration::from_millis(250)).await;
    poller.stop_all();

    // Naively that window fits ~25 ticks; sequential awaiting caps it
    // near ceil(250 / 80).
    assert!(incoming.hits() <= 5, "got {} hits", incoming.hits());
}

#[tokio::test]
async fn dropping_the_poller_stops_polling() {
    let server = MockServer::start();
    let incoming = server.mock(|when, then| {
        when.method(GET).path("/api/incoming-orders");
        then.status(200)
            .json_body(serde_json::json!({ "incoming_orders": [] }));
    });

    let client = DispatchClient::new(&server.base_url()).unwrap();
    let store = Arc::new(OrderLifecycleStore::new(client));
    {
        let mut poller = BucketPoller::new(
            Arc::clone(&store),
            fast_intervals(Duration::from_millis(20)),
        );
        poller.start_all();
        tokio::time::sleep(Duration::from_millis(60)).await;
    }

    let hits_after_drop = incoming.hits();
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(incoming.hits(), hits_after_drop);
}
