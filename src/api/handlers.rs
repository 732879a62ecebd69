//! API Handlers
//!
//! The request dispatcher: usage page, validation, cache lookup, and
//! upstream fetch with cache population.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use tracing::{debug, info};

use crate::allow_list::AllowList;
use crate::cache::{current_timestamp_ms, CacheEntry, CacheStore, Lookup};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{ProxyQuery, ProxyResponse, UsagePage};
use crate::upstream::{FetchResult, UpstreamFetcher};

/// Application state shared across all handlers.
///
/// The cache store is the only mutable part; it sits behind
/// `Arc<RwLock<>>` so each store operation is atomic across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe asset cache
    pub cache: Arc<RwLock<CacheStore>>,
    /// Hosts that may be proxied
    pub allow_list: AllowList,
    /// Outbound HTTP client
    pub fetcher: UpstreamFetcher,
    /// Listening port, shown on the usage page
    pub port: u16,
}

impl AppState {
    /// Creates a new AppState around an existing store.
    pub fn new(
        cache: CacheStore,
        allow_list: AllowList,
        fetcher: UpstreamFetcher,
        port: u16,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            allow_list,
            fetcher,
            port,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails only if the HTTP client cannot be initialized.
    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        Ok(Self::new(
            CacheStore::new(config.ttl()),
            AllowList::new(config.allowed_domains.iter().cloned()),
            UpstreamFetcher::new()?,
            config.server_port,
        ))
    }
}

/// Fallback handler for every path and method.
pub async fn proxy_handler(
    State(state): State<AppState>,
    uri: Uri,
    query: Option<Query<ProxyQuery>>,
) -> Result<Response> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    debug!("Request received: {}", uri);

    dispatch(&state, uri.path(), &query).await
}

/// Runs one request through the proxy pipeline.
///
/// Steps run strictly in order and every branch is terminal:
/// usage page, missing parameter, URL parse, allow-list, cache, fetch.
pub async fn dispatch(state: &AppState, path: &str, query: &ProxyQuery) -> Result<Response> {
    let Some(target) = query.target() else {
        if path == "/" {
            return Ok(usage_page(state).await);
        }
        return Err(ProxyError::MissingParameter);
    };

    let parsed = Url::parse(target).map_err(|_| ProxyError::MalformedUrl)?;
    let host = parsed.host_str().ok_or(ProxyError::MalformedUrl)?;

    if !state.allow_list.is_allowed(host) {
        debug!("Rejected host {}", host);
        return Err(ProxyError::DomainNotAllowed {
            allowed: state.allow_list.domains().to_vec(),
        });
    }

    let now = current_timestamp_ms();
    let lookup = state.cache.read().await.lookup_at(target, now);
    match lookup {
        Lookup::Hit(entry) => {
            info!("Serving from cache: {}", target);
            let age = entry.age_secs(now);
            return Ok(ProxyResponse::hit(entry.content_type, entry.payload, age).into_response());
        }
        Lookup::Stale => {
            // Reads never purge; the stale entry must go before refetching.
            // Re-checked under the write lock so a concurrent refresh survives.
            if state.cache.write().await.delete_if_stale(target, now) {
                debug!("Dropped expired cache entry: {}", target);
            }
        }
        Lookup::Miss => {}
    }

    info!("Fetching from CDN: {}", target);
    match state.fetcher.fetch(&parsed).await {
        FetchResult::TransportError { message } => Err(ProxyError::UpstreamTransport(message)),
        FetchResult::Success {
            status,
            content_type,
            body,
        } => {
            if status == StatusCode::OK {
                let entry = CacheEntry::new(body.clone(), content_type.clone());
                state.cache.write().await.put(target.to_string(), entry);
                info!("Cached: {}", target);
            } else {
                debug!("Not caching {} (status {})", target, status);
            }
            Ok(ProxyResponse::miss(status, content_type, body).into_response())
        }
    }
}

async fn usage_page(state: &AppState) -> Response {
    let cache_entries = state.cache.read().await.len();

    UsagePage {
        port: state.port,
        allowed_domains: state.allow_list.domains(),
        cache_entries,
    }
    .into_response()
}
