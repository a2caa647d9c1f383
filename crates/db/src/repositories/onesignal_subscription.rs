//! OneSignal subscription repository.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::OnConflict,
};

use crate::entities::onesignal_subscription::{ActiveModel, Column, Entity, Model};
use forumpush_common::{AppError, AppResult};

/// Repository for OneSignal subscriptions.
#[derive(Clone)]
pub struct OnesignalSubscriptionRepository {
    db: Arc<DatabaseConnection>,
}

impl OnesignalSubscriptionRepository {
    /// Create a new OneSignal subscription repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Whether the user has at least one registered player.
    pub async fn exists_for_user(&self, user_id: i64) -> AppResult<bool> {
        let first = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .limit(1)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(first.is_some())
    }

    /// Find all subscriptions for a user, newest first.
    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Model>> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Register a player for a user.
    ///
    /// Registering an existing player only refreshes `updated_at`, in the same
    /// statement as the insert.
    pub async fn subscribe(&self, user_id: i64, player_id: &str) -> AppResult<Model> {
        let now = Utc::now();

        let subscription = ActiveModel {
            user_id: Set(user_id),
            player_id: Set(player_id.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        Entity::insert(subscription)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::PlayerId])
                    .update_column(Column::UpdatedAt)
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a player registration. Returns the number of rows deleted.
    pub async fn unsubscribe(&self, user_id: i64, player_id: &str) -> AppResult<u64> {
        let result = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PlayerId.eq(player_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
