//! OneSignal subscription endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use forumpush_common::AppResult;
use forumpush_core::{SubscriptionInput, SubscriptionResponse};

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Register a player for a user.
async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscriptionInput>,
) -> AppResult<ApiResponse<SubscriptionResponse>> {
    let subscription = state.onesignal_subscriptions.subscribe(input).await?;
    Ok(ApiResponse::created(subscription))
}

/// Remove a player registration.
async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscriptionInput>,
) -> AppResult<impl IntoResponse> {
    state.onesignal_subscriptions.unsubscribe(input).await?;
    Ok(no_content())
}

/// List a user's players.
async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<ApiResponse<Vec<SubscriptionResponse>>> {
    let subscriptions = state.onesignal_subscriptions.list(user_id).await?;
    Ok(ApiResponse::ok(subscriptions))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", post(subscribe).delete(unsubscribe))
        .route("/subscriptions/{user_id}", get(list))
}
