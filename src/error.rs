//! Error types for the proxy
//!
//! Every variant is terminal for the request that raised it and maps to one
//! HTTP status with a plain-text body.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Proxy Error Enum ==
/// Request-level failures surfaced to the client.
///
/// A non-200 upstream status is not represented here: it is passed through
/// as a normal response.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// No `url` query value
    #[error("Bad Request: Missing \"url\" parameter\nUsage: /?url=CDN_URL")]
    MissingParameter,

    /// `url` present but no hostname could be extracted
    #[error("Bad Request: Invalid URL format")]
    MalformedUrl,

    /// Hostname is not in the allow-list
    #[error("Forbidden: Domain not allowed\nAllowed domains: {}", .allowed.join(", "))]
    DomainNotAllowed { allowed: Vec<String> },

    /// Network-level failure reaching the upstream host
    #[error("Bad Gateway: Unable to fetch resource from CDN\n{0}")]
    UpstreamTransport(String),
}

impl ProxyError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter | ProxyError::MalformedUrl => StatusCode::BAD_REQUEST,
            ProxyError::DomainNotAllowed { .. } => StatusCode::FORBIDDEN,
            ProxyError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain")],
            self.to_string(),
        )
            .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::MissingParameter.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::MalformedUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::DomainNotAllowed { allowed: vec![] }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ProxyError::UpstreamTransport("refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_domain_not_allowed_lists_domains() {
        let err = ProxyError::DomainNotAllowed {
            allowed: vec!["unpkg.com".into(), "code.jquery.com".into()],
        };
        assert_eq!(
            err.to_string(),
            "Forbidden: Domain not allowed\nAllowed domains: unpkg.com, code.jquery.com"
        );
    }

    #[test]
    fn test_transport_error_carries_message() {
        let err = ProxyError::UpstreamTransport("connection refused".into());
        assert!(err.to_string().ends_with("connection refused"));
    }

    #[test]
    fn test_into_response_is_plain_text() {
        let response = ProxyError::MalformedUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }
}
