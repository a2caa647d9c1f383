//! API endpoints.

mod health;
mod onesignal;
mod push;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/push", push::router())
        .nest("/onesignal", onesignal::router())
}
