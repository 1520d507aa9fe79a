// API client for the external business-data service
pub mod client;

// Re-export common types
pub use client::{BizApiClient, BizApiError, BizBusiness, BizCategory, BizLocation};
