//! Request and response models for the proxy
//!
//! Query DTOs and the response types the dispatcher emits.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ProxyQuery;
pub use responses::{CacheStatus, ProxyResponse, UsagePage, X_CACHE_AGE, X_PROXY_CACHE};
