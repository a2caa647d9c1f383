//! Forum user repository.

use std::sync::Arc;

use crate::entities::{ForumUser, forum_user};
use forumpush_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Read-only access to forum users.
#[derive(Clone)]
pub struct ForumUserRepository {
    db: Arc<DatabaseConnection>,
}

impl ForumUserRepository {
    /// Create a new forum user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<forum_user::Model>> {
        ForumUser::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<forum_user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound(id))
    }
}
