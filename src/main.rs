//! CDN Proxy - A caching forward proxy for static assets
//!
//! Fetches scripts, stylesheets, fonts and images from allow-listed CDN
//! hosts and caches successful responses for a bounded time.

use std::io::ErrorKind;
use std::net::SocketAddr;

use anyhow::{bail, Context};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cdn_proxy::{api::create_router, spawn_sweep_task, AppState, Config};

/// Main entry point for the CDN proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create shared state (cache store, allow-list, upstream client)
/// 4. Start background eviction sweep
/// 5. Bind and serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cdn_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, sweep_interval={}s",
        config.server_port, config.cache_ttl, config.sweep_interval
    );

    let state = AppState::from_config(&config).context("Failed to build upstream HTTP client")?;

    let sweep_handle = spawn_sweep_task(state.cache.clone(), config.sweep_period());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            bail!("Port {} is already in use", config.server_port)
        }
        Err(e) => return Err(e).context(format!("Failed to bind {}", addr)),
    };

    log_banner(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("Server error")?;

    info!("Server closed");
    Ok(())
}

fn log_banner(config: &Config) {
    let port = config.server_port;
    info!("CDN Proxy Server is running on http://localhost:{}", port);
    info!("Usage: http://localhost:{}/?url=CDN_URL", port);
    info!(
        "Example: http://localhost:{}/?url=https://cdn.jsdelivr.net/npm/jquery@3.6.0/dist/jquery.min.js",
        port
    );
    info!("Allowed CDN domains:");
    for domain in &config.allowed_domains {
        info!("  - {}", domain);
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down server...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down server...");
        }
    }

    sweep_handle.abort();
    warn!("Sweep task aborted");
}
