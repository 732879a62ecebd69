//! Upstream fetcher
//!
//! Issues a single GET to a CDN host and buffers the whole response.
//!
//! # Behavior
//! - `https` targets use TLS with default port 443; every other scheme is
//!   fetched over plain HTTP with default port 80
//! - Redirects are not followed, so 3xx statuses reach the caller unchanged
//! - No retries and no timeout: the fetch ends with a response or a
//!   transport error

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, StatusCode},
};
use reqwest::{redirect::Policy, Client, Url};
use tracing::{debug, error};

use super::content_type::content_type_for;

/// Identifies the proxy to upstream hosts.
pub const USER_AGENT: &str = "CDN-Proxy-Server/1.0";

// == Fetch Result ==
/// Outcome of one upstream fetch.
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Upstream answered; `status` may be anything, including errors.
    Success {
        status: StatusCode,
        content_type: String,
        body: Bytes,
    },
    /// The request/response exchange could not be completed.
    TransportError { message: String },
}

// == Upstream Fetcher ==
/// HTTP client for CDN hosts.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: Client,
}

impl UpstreamFetcher {
    /// Builds the fetcher with the proxy user agent and redirects disabled.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `target` and materializes the full body.
    ///
    /// `Content-Type` comes from the upstream header when present, otherwise
    /// from the target path's extension.
    pub async fn fetch(&self, target: &Url) -> FetchResult {
        let Some(url) = transport_url(target) else {
            return FetchResult::TransportError {
                message: format!("No host in upstream URL: {}", target),
            };
        };

        debug!("GET {}", url);

        match self.exchange(url, target).await {
            Ok(result) => result,
            Err(e) => {
                error!("Error fetching from CDN: {}", e);
                FetchResult::TransportError {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn exchange(&self, url: Url, target: &Url) -> Result<FetchResult, reqwest::Error> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| content_type_for(target.path()).to_string());

        let body = response.bytes().await?;

        Ok(FetchResult::Success {
            status,
            content_type,
            body,
        })
    }
}

/// Rewrites `target` into the URL actually requested upstream.
///
/// Keeps host, port, path and query; drops credentials and fragment. Any
/// scheme other than `https` becomes `http`, and a missing port gets the
/// scheme default.
pub fn transport_url(target: &Url) -> Option<Url> {
    let secure = target.scheme() == "https";
    let scheme = if secure { "https" } else { "http" };
    let host = target.host_str()?;
    let port = target.port().unwrap_or(if secure { 443 } else { 80 });

    let mut url = Url::parse(&format!("{}://{}:{}/", scheme, host, port)).ok()?;
    url.set_path(target.path());
    url.set_query(target.query());
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_transport_url_https_default_port() {
        let target = url("https://cdn.jsdelivr.net/npm/jquery@3.6.0/dist/jquery.min.js");
        let resolved = transport_url(&target).unwrap();

        assert_eq!(resolved.scheme(), "https");
        assert_eq!(resolved.port_or_known_default(), Some(443));
        assert_eq!(resolved.path(), "/npm/jquery@3.6.0/dist/jquery.min.js");
    }

    #[test]
    fn test_transport_url_http_keeps_port_and_query() {
        let target = url("http://127.0.0.1:8080/a.css?v=2#frag");
        let resolved = transport_url(&target).unwrap();

        assert_eq!(resolved.as_str(), "http://127.0.0.1:8080/a.css?v=2");
    }

    #[test]
    fn test_transport_url_other_scheme_is_plain_http() {
        let target = url("ftp://unpkg.com/react.js");
        let resolved = transport_url(&target).unwrap();

        assert_eq!(resolved.scheme(), "http");
        assert_eq!(resolved.port_or_known_default(), Some(80));
        assert_eq!(resolved.host_str(), Some("unpkg.com"));
    }

    #[test]
    fn test_transport_url_without_host() {
        assert!(transport_url(&url("mailto:someone@example.com")).is_none());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let fetcher = UpstreamFetcher::new().unwrap();

        // Bind then drop to get a port nothing is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = fetcher
            .fetch(&url(&format!("http://127.0.0.1:{}/lib.js", port)))
            .await;

        assert!(matches!(result, FetchResult::TransportError { .. }));
    }
}
