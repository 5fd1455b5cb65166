use std::fmt;

use async_trait::async_trait;

use crate::domain::bucket::Bucket;
use crate::domain::order::{Order, OrderId};

/// Why a server call failed. Success is any status in [200, 300); anything
/// else, or a transport/parse failure, lands here.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Decode(String),
}

/// The POST lifecycle endpoints under `api/orders/{id}/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Accept,
    Reject,
    /// Accepted -> In-Progress.
    Advance,
    /// In-Progress -> Completed.
    Complete,
    Cancel,
}

impl OrderAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            OrderAction::Accept => "accept",
            OrderAction::Reject => "reject",
            OrderAction::Advance => "in-progress",
            OrderAction::Complete => "completed",
            OrderAction::Cancel => "cancel",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderAction::Accept => "accept",
            OrderAction::Reject => "reject",
            OrderAction::Advance => "advance",
            OrderAction::Complete => "complete",
            OrderAction::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// Port over the delivery server's REST surface. The store depends on this
/// trait only; `dispatch-client` is the production implementation.
#[async_trait]
pub trait OrderApi: Send + Sync + 'static {
    /// Current contents of one bucket.
    async fn list_bucket(&self, bucket: Bucket) -> Result<Vec<Order>, ApiError>;

    /// Full order history, newest first as the server returns it.
    async fn order_history(&self) -> Result<Vec<Order>, ApiError>;

    /// Request a lifecycle transition. The server validates the transition;
    /// the client sends it regardless of its own view.
    async fn post_action(&self, id: &OrderId, action: OrderAction) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_path_segments() {
        assert_eq!(OrderAction::Accept.path_segment(), "accept");
        assert_eq!(OrderAction::Advance.path_segment(), "in-progress");
        assert_eq!(OrderAction::Complete.path_segment(), "completed");
    }
}
