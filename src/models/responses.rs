//! Response types for the proxy
//!
//! Proxied asset responses and the HTML usage page.

use axum::{
    body::{Body, Bytes},
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};

use crate::upstream::DEFAULT_CONTENT_TYPE;

/// Header reporting whether the asset came from the cache.
pub const X_PROXY_CACHE: &str = "x-proxy-cache";
/// Header reporting the age of a cached asset, e.g. `12s`.
pub const X_CACHE_AGE: &str = "x-cache-age";

/// Where a proxied response was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// An asset returned to the client, from cache or straight from upstream.
///
/// Always carries `Content-Type`, `Content-Length`,
/// `Access-Control-Allow-Origin: *` and `X-Proxy-Cache`. `X-Cache-Age` is set
/// only on hits.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
    pub cache: CacheStatus,
    /// Age in whole seconds, hits only
    pub age_secs: Option<u64>,
}

impl ProxyResponse {
    /// A cache hit of the given age.
    pub fn hit(content_type: impl Into<String>, body: Bytes, age_secs: u64) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: content_type.into(),
            body,
            cache: CacheStatus::Hit,
            age_secs: Some(age_secs),
        }
    }

    /// A freshly fetched upstream response with its original status.
    pub fn miss(status: StatusCode, content_type: impl Into<String>, body: Bytes) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body,
            cache: CacheStatus::Miss,
            age_secs: None,
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        let length = self.body.len();

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, content_type);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        headers.insert(X_PROXY_CACHE, HeaderValue::from_static(self.cache.as_str()));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        if let Some(age) = self.age_secs {
            if let Ok(value) = HeaderValue::from_str(&format!("{}s", age)) {
                headers.insert(X_CACHE_AGE, value);
            }
        }

        response
    }
}

/// HTML page served at `/` without a `url` parameter.
#[derive(Debug, Clone)]
pub struct UsagePage<'a> {
    pub port: u16,
    pub allowed_domains: &'a [String],
    pub cache_entries: usize,
}

impl UsagePage<'_> {
    pub fn render(&self) -> String {
        let domains: String = self
            .allowed_domains
            .iter()
            .map(|d| format!("<li>{}</li>", d))
            .collect();

        format!(
            "<html>\
             <head><title>CDN Proxy Server</title></head>\
             <body>\
             <h1>CDN Proxy Server</h1>\
             <p>Usage: <code>http://localhost:{port}/?url=CDN_URL</code></p>\
             <h2>Examples:</h2>\
             <ul>\
             <li><a href=\"/?url=https://cdn.jsdelivr.net/npm/jquery@3.6.0/dist/jquery.min.js\">jQuery from jsDelivr</a></li>\
             <li><a href=\"/?url=https://cdnjs.cloudflare.com/ajax/libs/lodash.js/4.17.21/lodash.min.js\">Lodash from Cloudflare</a></li>\
             </ul>\
             <h2>Allowed CDN Domains:</h2>\
             <ul>{domains}</ul>\
             <p>Cache entries: {entries}</p>\
             </body>\
             </html>",
            port = self.port,
            domains = domains,
            entries = self.cache_entries,
        )
    }
}

impl IntoResponse for UsagePage<'_> {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_headers() {
        let response =
            ProxyResponse::hit("text/css", Bytes::from_static(b"body{}"), 42).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE], "text/css");
        assert_eq!(headers[CONTENT_LENGTH], "6");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[X_PROXY_CACHE], "HIT");
        assert_eq!(headers[X_CACHE_AGE], "42s");
    }

    #[test]
    fn test_miss_has_no_age_and_keeps_status() {
        let response = ProxyResponse::miss(
            StatusCode::NOT_FOUND,
            "text/plain",
            Bytes::from_static(b"Not found"),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[X_PROXY_CACHE], "MISS");
        assert_eq!(response.headers()[CONTENT_LENGTH], "9");
        assert!(response.headers().get(X_CACHE_AGE).is_none());
    }

    #[test]
    fn test_invalid_content_type_falls_back() {
        let response =
            ProxyResponse::miss(StatusCode::OK, "bad\nvalue", Bytes::new()).into_response();
        assert_eq!(response.headers()[CONTENT_TYPE], DEFAULT_CONTENT_TYPE);
        assert_eq!(response.headers()[CONTENT_LENGTH], "0");
    }

    #[test]
    fn test_usage_page_lists_domains_and_count() {
        let domains = vec!["unpkg.com".to_string(), "fonts.gstatic.com".to_string()];
        let html = UsagePage {
            port: 3000,
            allowed_domains: &domains,
            cache_entries: 7,
        }
        .render();

        assert!(html.contains("<li>unpkg.com</li>"));
        assert!(html.contains("<li>fonts.gstatic.com</li>"));
        assert!(html.contains("Cache entries: 7"));
        assert!(html.contains("http://localhost:3000/?url=CDN_URL"));
    }
}
