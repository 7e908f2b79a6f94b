pub mod ingestion;
pub mod repository;
pub mod service;
pub mod source;
