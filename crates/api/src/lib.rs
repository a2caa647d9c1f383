//! HTTP API layer for forumpush.
//!
//! - **Dispatch**: `POST /push/dispatch` runs the dispatch gate
//! - **Subscriptions**: OneSignal player registration
//! - **Health**: `GET /healthz`
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
