//! Domain allow-list
//!
//! The set of upstream hosts the proxy is permitted to fetch from.

use std::sync::Arc;

/// Immutable, ordered list of permitted hostnames.
///
/// Matching is exact and case-sensitive: no subdomain wildcards and no
/// normalization beyond what the URL parser already did to the host.
#[derive(Debug, Clone)]
pub struct AllowList {
    domains: Arc<[String]>,
}

impl AllowList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `hostname` is one of the configured domains.
    pub fn is_allowed(&self, hostname: &str) -> bool {
        self.domains.iter().any(|d| d == hostname)
    }

    /// Configured domains in their original order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }
}
