//! Browser push subscription repository.

use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::entities::push_subscription::{Column, Entity, Model};
use forumpush_common::{AppError, AppResult};

/// Read-only access to the forum's browser push subscriptions.
#[derive(Clone)]
pub struct PushSubscriptionRepository {
    db: Arc<DatabaseConnection>,
}

impl PushSubscriptionRepository {
    /// Create a new push subscription repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Whether the user has at least one browser push subscription.
    pub async fn exists_for_user(&self, user_id: i64) -> AppResult<bool> {
        let first = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .limit(1)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(first.is_some())
    }

    /// Find all subscriptions for a user.
    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Model>> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
