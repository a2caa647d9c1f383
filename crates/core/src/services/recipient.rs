//! Read-only lookups the dispatch gate needs about a user.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forumpush_common::AppResult;
use forumpush_db::entities::forum_user;
use forumpush_db::repositories::{
    ForumUserRepository, OnesignalSubscriptionRepository, PushSubscriptionRepository,
    UserApiKeyRepository,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// The user a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRecipient {
    /// User ID
    pub id: i64,
    /// Username
    pub username: String,
    /// Whether the user currently suppresses notifications
    pub do_not_disturb: bool,
}

impl PushRecipient {
    /// Build a recipient from a user row, evaluating do-not-disturb now.
    #[must_use]
    pub fn from_model(user: &forum_user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            do_not_disturb: user.is_do_not_disturb_at(Utc::now().into()),
        }
    }
}

/// A user API client that receives pushes at its own URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushClient {
    /// Client identifier
    pub client_id: String,
    /// Push delivery URL
    pub push_url: String,
}

/// Port for the recipient lookups performed during dispatch.
///
/// Implementations only read; they never create or delete records.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Load a recipient by user ID.
    async fn find_recipient(&self, user_id: i64) -> AppResult<Option<PushRecipient>>;

    /// Whether the user has browser push subscriptions.
    async fn has_push_subscriptions(&self, user_id: i64) -> AppResult<bool>;

    /// Whether the user has OneSignal subscriptions.
    async fn has_onesignal_subscriptions(&self, user_id: i64) -> AppResult<bool>;

    /// Clients with a push scope whose URL occurs in `allowed_push_urls`,
    /// ordered by client id.
    async fn push_clients(
        &self,
        user_id: i64,
        allowed_push_urls: &str,
    ) -> AppResult<Vec<PushClient>>;
}

/// Database-backed [`RecipientDirectory`].
#[derive(Clone)]
pub struct DbRecipientDirectory {
    users: ForumUserRepository,
    push_subscriptions: PushSubscriptionRepository,
    onesignal_subscriptions: OnesignalSubscriptionRepository,
    api_keys: UserApiKeyRepository,
}

impl DbRecipientDirectory {
    /// Create a directory over the given connection.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            users: ForumUserRepository::new(Arc::clone(&db)),
            push_subscriptions: PushSubscriptionRepository::new(Arc::clone(&db)),
            onesignal_subscriptions: OnesignalSubscriptionRepository::new(Arc::clone(&db)),
            api_keys: UserApiKeyRepository::new(db),
        }
    }
}

#[async_trait]
impl RecipientDirectory for DbRecipientDirectory {
    async fn find_recipient(&self, user_id: i64) -> AppResult<Option<PushRecipient>> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| PushRecipient::from_model(&user)))
    }

    async fn has_push_subscriptions(&self, user_id: i64) -> AppResult<bool> {
        self.push_subscriptions.exists_for_user(user_id).await
    }

    async fn has_onesignal_subscriptions(&self, user_id: i64) -> AppResult<bool> {
        self.onesignal_subscriptions.exists_for_user(user_id).await
    }

    async fn push_clients(
        &self,
        user_id: i64,
        allowed_push_urls: &str,
    ) -> AppResult<Vec<PushClient>> {
        let clients = self
            .api_keys
            .find_push_clients(user_id, allowed_push_urls)
            .await?;
        Ok(clients
            .into_iter()
            .map(|(client_id, push_url)| PushClient {
                client_id,
                push_url,
            })
            .collect())
    }
}
