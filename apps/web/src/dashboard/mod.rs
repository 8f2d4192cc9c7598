pub mod aggregation;
pub mod handlers;
