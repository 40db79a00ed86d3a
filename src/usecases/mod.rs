//! Application use cases. Orchestrate domain logic via ports.

pub mod record_service;

pub use record_service::RecordService;
