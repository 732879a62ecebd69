//! Request DTOs for the proxy
//!
//! Defines the query string accepted on every path.

use serde::Deserialize;

/// Query parameters of a proxy request (`/?url=CDN_URL`)
///
/// # Fields
/// - `url`: Absolute URL of the asset to fetch. Other parameters are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyQuery {
    /// The target asset URL, exactly as the client sent it
    #[serde(default)]
    pub url: Option<String>,
}

impl ProxyQuery {
    /// Returns the target URL, treating an empty value as absent.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    fn parse(uri: &'static str) -> ProxyQuery {
        let uri = Uri::from_static(uri);
        let Query(query) = Query::<ProxyQuery>::try_from_uri(&uri).unwrap();
        query
    }

    #[test]
    fn test_query_with_url() {
        let query = parse("/?url=https%3A%2F%2Funpkg.com%2Freact.js%3Fv%3D1");
        assert_eq!(query.target(), Some("https://unpkg.com/react.js?v=1"));
    }

    #[test]
    fn test_query_without_url() {
        assert_eq!(parse("/").target(), None);
        assert_eq!(parse("/?other=1").target(), None);
    }

    #[test]
    fn test_empty_url_counts_as_missing() {
        assert_eq!(parse("/?url=").target(), None);
    }
}
