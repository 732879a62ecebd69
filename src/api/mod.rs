//! API Module
//!
//! HTTP dispatch and routing for the proxy.
//!
//! # Endpoints
//! - `GET /` - Usage page
//! - `GET /?url=<absolute-URL>` - Proxied asset (any path is accepted)

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
