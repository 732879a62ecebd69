//! CDN Proxy - A caching forward proxy for static assets
//!
//! Fetches scripts, stylesheets, fonts and images from allow-listed CDN
//! hosts and caches successful responses for a bounded time.

pub mod allow_list;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use allow_list::AllowList;
pub use api::AppState;
pub use config::Config;
pub use error::ProxyError;
pub use tasks::spawn_sweep_task;
