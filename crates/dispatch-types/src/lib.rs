//! dispatch-types: domain types and the server-API port shared by the
//! dispatch dashboard crates.

pub mod domain;
pub mod ports;
