use std::sync::Arc;
use std::time::Duration;

use dispatch_client::DispatchClient;
use dispatch_store::config::Config;
use dispatch_store::poller::BucketPoller;
use dispatch_store::store::OrderLifecycleStore;
use dispatch_types::domain::bucket::Bucket;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DISPATCH_BASE_URL / poll intervals when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(base_url = %config.base_url, "starting dispatch console");

    let client = DispatchClient::builder(&config.base_url)?
        .with_timeout(config.request_timeout)
        .build()?;
    let store = Arc::new(OrderLifecycleStore::new(client));
    let mut poller = BucketPoller::new(Arc::clone(&store), config.poll.clone());
    poller.start_all();

    let mut summary = tokio::time::interval(Duration::from_secs(2));
    loop {
        tokio::select! {
            _ = summary.tick() => {
                for bucket in Bucket::ALL {
                    let orders = store.snapshot(bucket).await;
                    tracing::info!(%bucket, count = orders.len(), "bucket");
                    for order in &orders {
                        tracing::debug!(
                            id = %order.id,
                            status = ?order.status,
                            address = order.delivery_address_label(),
                            items = %order.items.join(", "),
                            "order"
                        );
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("shutting down");
    poller.stop_all();
    Ok(())
}
