pub mod aggregation;
pub mod service;
