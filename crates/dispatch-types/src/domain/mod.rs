pub mod bucket;
pub mod order;
