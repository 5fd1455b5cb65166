use dispatch_types::domain::bucket::Bucket;
use dispatch_types::domain::order::OrderId;
use dispatch_types::ports::order_api::{ApiError, OrderAction};
use thiserror::Error;

/// A read call failed. The bucket's last-known-good list is kept as is;
/// the next poll is the retry.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("refresh of {bucket} bucket failed: {source}")]
    Bucket {
        bucket: Bucket,
        #[source]
        source: ApiError,
    },
    #[error("history fetch failed: {0}")]
    History(#[source] ApiError),
}

/// A transition call failed. No optimistic patch was applied; local state
/// is exactly what it was before the call.
#[derive(Error, Debug)]
#[error("{action} failed for order {id}: {source}")]
pub struct ActionError {
    pub id: OrderId,
    pub action: OrderAction,
    #[source]
    pub source: ApiError,
}
