use std::collections::HashMap;
use std::sync::Arc;

use dispatch_types::domain::bucket::Bucket;
use dispatch_types::ports::order_api::OrderApi;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::PollIntervals;
use crate::store::OrderLifecycleStore;

/// Drives periodic refreshes, one timer task per started bucket.
///
/// The first refresh fires immediately, then at the configured cadence.
/// Each refresh is awaited before the next tick is taken and missed ticks
/// are coalesced, so a poll slower than its interval never stacks
/// requests behind itself. Stopping a bucket aborts its task; a refresh
/// in flight at that moment is dropped and its result discarded.
pub struct BucketPoller<A: OrderApi> {
    store: Arc<OrderLifecycleStore<A>>,
    intervals: PollIntervals,
    handles: HashMap<Bucket, JoinHandle<()>>,
}

impl<A: OrderApi> BucketPoller<A> {
    pub fn new(store: Arc<OrderLifecycleStore<A>>, intervals: PollIntervals) -> Self {
        Self {
            store,
            intervals,
            handles: HashMap::new(),
        }
    }

    /// Start polling one bucket. A bucket with no configured interval is
    /// left alone; starting an already-polled bucket is a no-op.
    pub fn start(&mut self, bucket: Bucket) {
        let Some(period) = self.intervals.for_bucket(bucket) else {
            tracing::debug!(%bucket, "no poll interval configured, not starting");
            return;
        };
        if self.handles.contains_key(&bucket) {
            return;
        }

        let store = Arc::clone(&self.store);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // The last-known-good list is kept on failure; the next
                // tick is the retry.
                if let Err(err) = store.refresh(bucket).await {
                    tracing::warn!(%bucket, error = %err, "poll refresh failed");
                }
            }
        });
        tracing::info!(%bucket, period_ms = period.as_millis() as u64, "polling started");
        self.handles.insert(bucket, handle);
    }

    pub fn start_all(&mut self) {
        for bucket in Bucket::ALL {
            self.start(bucket);
        }
    }

    pub fn stop(&mut self, bucket: Bucket) {
        if let Some(handle) = self.handles.remove(&bucket) {
            handle.abort();
            tracing::info!(%bucket, "polling stopped");
        }
    }

    pub fn stop_all(&mut self) {
        for bucket in Bucket::ALL {
            self.stop(bucket);
        }
    }

    pub fn is_polling(&self, bucket: Bucket) -> bool {
        self.handles.contains_key(&bucket)
    }
}

impl<A: OrderApi> Drop for BucketPoller<A> {
    fn drop(&mut self) {
        self.stop_all();
    }
}
