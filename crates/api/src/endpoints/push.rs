//! Push dispatch endpoint.
//!
//! The forum calls this after it has stored a notification.

use axum::{Json, Router, extract::State, routing::post};
use forumpush_common::{AppError, AppResult};
use forumpush_core::{DispatchOutcome, NotificationPayload};
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Request to dispatch a notification.
#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    /// Recipient user ID
    pub user_id: i64,
    /// Notification to push
    pub payload: NotificationPayload,
}

/// Dispatch result.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    /// What the dispatch gate decided
    pub outcome: DispatchOutcome,
}

/// Run the dispatch gate for one recipient.
async fn dispatch(
    State(state): State<AppState>,
    Json(req): Json<DispatchRequest>,
) -> AppResult<ApiResponse<DispatchResponse>> {
    let recipient = state
        .directory
        .find_recipient(req.user_id)
        .await?
        .ok_or(AppError::UserNotFound(req.user_id))?;

    let outcome = state.dispatcher.dispatch(&recipient, &req.payload).await;

    Ok(ApiResponse::ok(DispatchResponse { outcome }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dispatch", post(dispatch))
}
