//! OneSignal subscription service.
//!
//! Mobile apps register their OneSignal player id here so the dispatch gate
//! knows the user can be reached through OneSignal.

use forumpush_common::AppResult;
use forumpush_db::entities::onesignal_subscription;
use forumpush_db::repositories::{ForumUserRepository, OnesignalSubscriptionRepository};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for registering or removing a player.
#[derive(Debug, Deserialize, Validate)]
pub struct SubscriptionInput {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub player_id: String,
}

impl SubscriptionInput {
    /// Trim the player id. Validation runs on the trimmed value.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            user_id: self.user_id,
            player_id: self.player_id.trim().to_string(),
        }
    }
}

/// OneSignal subscription response.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub user_id: i64,
    pub player_id: String,
    pub created_at: String,
}

impl From<onesignal_subscription::Model> for SubscriptionResponse {
    fn from(model: onesignal_subscription::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            player_id: model.player_id,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Service for managing OneSignal subscriptions.
#[derive(Clone)]
pub struct OnesignalSubscriptionService {
    user_repo: ForumUserRepository,
    subscription_repo: OnesignalSubscriptionRepository,
}

impl OnesignalSubscriptionService {
    /// Create a new OneSignal subscription service.
    #[must_use]
    pub const fn new(
        user_repo: ForumUserRepository,
        subscription_repo: OnesignalSubscriptionRepository,
    ) -> Self {
        Self {
            user_repo,
            subscription_repo,
        }
    }

    /// Register a player for a user.
    pub async fn subscribe(&self, input: SubscriptionInput) -> AppResult<SubscriptionResponse> {
        let input = input.normalized();
        input.validate()?;

        let user = self.user_repo.get_by_id(input.user_id).await?;
        let subscription = self
            .subscription_repo
            .subscribe(user.id, &input.player_id)
            .await?;

        tracing::info!(user_id = user.id, "Registered OneSignal subscription");
        Ok(subscription.into())
    }

    /// Remove a player registration. Returns whether anything was removed.
    pub async fn unsubscribe(&self, input: SubscriptionInput) -> AppResult<bool> {
        let input = input.normalized();
        input.validate()?;

        let removed = self
            .subscription_repo
            .unsubscribe(input.user_id, &input.player_id)
            .await?;

        if removed > 0 {
            tracing::info!(user_id = input.user_id, "Removed OneSignal subscription");
        }
        Ok(removed > 0)
    }

    /// List a user's registered players.
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<SubscriptionResponse>> {
        let subscriptions = self.subscription_repo.find_by_user_id(user_id).await?;
        Ok(subscriptions.into_iter().map(Into::into).collect())
    }
}
