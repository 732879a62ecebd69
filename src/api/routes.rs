//! API Routes
//!
//! Configures the Axum router for the proxy.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{proxy_handler, AppState};

/// Creates the main router.
///
/// Every path and method lands on [`proxy_handler`], which decides between
/// the usage page, an error, or a proxied asset.
///
/// # Middleware
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allow_list::AllowList;
    use crate::cache::CacheStore;
    use crate::upstream::UpstreamFetcher;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            CacheStore::new(Duration::from_secs(3600)),
            AllowList::new(["cdn.jsdelivr.net"]),
            UpstreamFetcher::new().unwrap(),
            3000,
        );
        create_router(state)
    }

    async fn get(uri: &str) -> axum::response::Response {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let response = get("/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_any_other_path_without_url() {
        assert_eq!(get("/health").await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get("/a/b/c").await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_forbidden_on_any_path() {
        let response = get("/some/path?url=https%3A%2F%2Fevil.example%2Fscript.js").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_post_is_dispatched_too() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
