//! Upstream Module
//!
//! Outbound fetching from CDN hosts and content-type derivation.

mod content_type;
mod fetcher;

pub use content_type::{content_type_for, DEFAULT_CONTENT_TYPE};
pub use fetcher::{transport_url, FetchResult, UpstreamFetcher, USER_AGENT};
