//! dispatch-store: order lifecycle state for the operator dashboard
//! (buckets, optimistic patches, polling).

pub mod config;
pub mod errors;
pub mod poller;
pub mod store;

pub use dispatch_types::{domain, ports};
