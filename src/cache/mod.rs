//! Cache Module
//!
//! Provides in-memory caching of upstream assets with TTL expiration.

mod entry;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use store::{CacheStore, Lookup};
