//! Cache Entry Module
//!
//! Defines a cached upstream asset and its age bookkeeping.

use std::time::Duration;

use axum::body::Bytes;

// == Cache Entry ==
/// A successful upstream response held in the cache.
///
/// Entries are only ever replaced whole, never updated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Response body exactly as received from upstream
    pub payload: Bytes,
    /// Content type served with the payload
    pub content_type: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: Bytes, content_type: impl Into<String>) -> Self {
        Self::with_created_at(payload, content_type, current_timestamp_ms())
    }

    /// Creates an entry with an explicit creation timestamp.
    pub fn with_created_at(
        payload: Bytes,
        content_type: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            payload,
            content_type: content_type.into(),
            created_at,
        }
    }

    // == Age ==
    /// Age in milliseconds relative to `now`. Never negative.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// Whole seconds of age, as reported in `X-Cache-Age`.
    pub fn age_secs(&self, now: u64) -> u64 {
        self.age_ms(now) / 1000
    }

    // == Is Expired ==
    /// Read-path expiry check.
    ///
    /// Boundary condition: an entry whose age has reached the TTL is already
    /// expired for readers.
    pub fn is_expired_at(&self, now: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now)) >= ttl.as_millis()
    }

    /// Sweep-path expiry check: strictly older than the TTL.
    pub fn is_older_than(&self, now: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now)) > ttl.as_millis()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
