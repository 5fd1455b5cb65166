use dispatch_types::domain::bucket::Bucket;
use dispatch_types::domain::order::{Order, OrderId, OrderStatus};
use dispatch_types::ports::order_api::{OrderApi, OrderAction};
use tokio::sync::Mutex;

use crate::errors::{ActionError, FetchError};

/// How a successful transition is reflected locally before the next poll
/// confirms it. The two strategies are deliberately distinct: the accepted
/// screen drops a transitioned order outright, while the in-progress
/// screen keeps the row and only edits its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchStrategy {
    /// Edit the order's status where it sits; the bucket keeps the row.
    PatchInPlace(Bucket, OrderStatus),
    /// Drop the order from the bucket; the destination screen's own poll
    /// picks it up.
    RemoveOnTransition(Bucket),
}

struct BucketSlot {
    orders: Mutex<Vec<Order>>,
    /// Held for the duration of a refresh. A second refresh finding it
    /// taken coalesces instead of stacking another request.
    refresh_gate: Mutex<()>,
}

impl BucketSlot {
    fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            refresh_gate: Mutex::new(()),
        }
    }
}

/// The operator's current view of orders across the four lifecycle
/// buckets.
///
/// The server is the sole source of truth: every transition is delegated
/// to it, each successful call applies an optimistic local patch, and the
/// next successful [`refresh`](Self::refresh) fully replaces the bucket,
/// superseding any patch. Buckets are independent; no cross-bucket
/// locking exists.
pub struct OrderLifecycleStore<A: OrderApi> {
    api: A,
    slots: [BucketSlot; 4],
    reject_status: OrderStatus,
}

impl<A: OrderApi> OrderLifecycleStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            slots: [
                BucketSlot::new(),
                BucketSlot::new(),
                BucketSlot::new(),
                BucketSlot::new(),
            ],
            reject_status: OrderStatus::Accepted,
        }
    }

    /// Status patched onto an order after a successful reject. Defaults to
    /// `Accepted`, which mirrors the accept patch; override once the
    /// server contract defines a dedicated rejected state.
    pub fn with_reject_status(mut self, status: OrderStatus) -> Self {
        self.reject_status = status;
        self
    }

    fn slot(&self, bucket: Bucket) -> &BucketSlot {
        let idx = match bucket {
            Bucket::Incoming => 0,
            Bucket::Accepted => 1,
            Bucket::InProgress => 2,
            Bucket::Completed => 3,
        };
        &self.slots[idx]
    }

    /// Copy of a bucket's last-known-good list.
    pub async fn snapshot(&self, bucket: Bucket) -> Vec<Order> {
        self.slot(bucket).orders.lock().await.clone()
    }

    /// Poll one bucket and replace its local list wholesale with the
    /// server's. On failure the local list is left untouched. If a refresh
    /// for this bucket is already outstanding, no second request is made
    /// and the current list is returned as is.
    pub async fn refresh(&self, bucket: Bucket) -> Result<Vec<Order>, FetchError> {
        let slot = self.slot(bucket);
        let _gate = match slot.refresh_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                tracing::debug!(%bucket, "refresh already in flight, returning current list");
                return Ok(slot.orders.lock().await.clone());
            }
        };

        let fetched = self
            .api
            .list_bucket(bucket)
            .await
            .map_err(|source| FetchError::Bucket { bucket, source })?;
        let mut orders = slot.orders.lock().await;
        *orders = fetched.clone();
        Ok(fetched)
    }

    /// Full order history, fetched on demand and never cached in a bucket.
    pub async fn history(&self) -> Result<Vec<Order>, FetchError> {
        self.api.order_history().await.map_err(FetchError::History)
    }

    /// Incoming -> Accepted. The order stays in the incoming bucket with
    /// its status edited in place.
    pub async fn accept(&self, id: &OrderId) -> Result<(), ActionError> {
        self.transition(id, OrderAction::Accept).await
    }

    /// Reject an incoming order. The locally patched status is
    /// [`with_reject_status`](Self::with_reject_status).
    pub async fn reject(&self, id: &OrderId) -> Result<(), ActionError> {
        self.transition(id, OrderAction::Reject).await
    }

    /// Accepted -> In-Progress. The order leaves the accepted bucket; the
    /// in-progress screen's next poll owns it.
    pub async fn advance(&self, id: &OrderId) -> Result<(), ActionError> {
        self.transition(id, OrderAction::Advance).await
    }

    /// In-Progress -> Completed. The order stays in the in-progress bucket
    /// showing `Completed` until that bucket's next poll.
    pub async fn mark_done(&self, id: &OrderId) -> Result<(), ActionError> {
        self.transition(id, OrderAction::Complete).await
    }

    /// Cancel from any of the incoming, accepted, or in-progress buckets;
    /// the order is removed from whichever currently holds it.
    pub async fn cancel(&self, id: &OrderId) -> Result<(), ActionError> {
        self.transition(id, OrderAction::Cancel).await
    }

    /// The POST always goes out, whether or not the order is tracked
    /// locally; the server validates the transition. Only after it
    /// confirms is the local patch applied, so a failed call leaves every
    /// bucket untouched.
    async fn transition(&self, id: &OrderId, action: OrderAction) -> Result<(), ActionError> {
        self.api
            .post_action(id, action)
            .await
            .map_err(|source| ActionError {
                id: id.clone(),
                action,
                source,
            })?;
        self.apply_patch(id, action).await;
        Ok(())
    }

    fn patch_plan(&self, action: OrderAction) -> Vec<PatchStrategy> {
        use PatchStrategy::*;
        match action {
            OrderAction::Accept => vec![PatchInPlace(Bucket::Incoming, OrderStatus::Accepted)],
            OrderAction::Reject => vec![PatchInPlace(Bucket::Incoming, self.reject_status)],
            OrderAction::Advance => vec![RemoveOnTransition(Bucket::Accepted)],
            OrderAction::Complete => vec![PatchInPlace(Bucket::InProgress, OrderStatus::Completed)],
            OrderAction::Cancel => vec![
                RemoveOnTransition(Bucket::Incoming),
                RemoveOnTransition(Bucket::Accepted),
                RemoveOnTransition(Bucket::InProgress),
            ],
        }
    }

    async fn apply_patch(&self, id: &OrderId, action: OrderAction) {
        for strategy in self.patch_plan(action) {
            match strategy {
                PatchStrategy::PatchInPlace(bucket, status) => {
                    let mut orders = self.slot(bucket).orders.lock().await;
                    if let Some(order) = orders.iter_mut().find(|o| &o.id == id) {
                        order.status = status;
                    }
                }
                PatchStrategy::RemoveOnTransition(bucket) => {
                    let mut orders = self.slot(bucket).orders.lock().await;
                    orders.retain(|o| &o.id != id);
                }
            }
        }
    }
}
