//! User API key repository.

use std::sync::Arc;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, sea_query::Expr,
};

use crate::entities::{user_api_key, user_api_key_scope};
use forumpush_common::{AppError, AppResult};

/// Scopes that allow a client to receive pushes.
pub const PUSH_SCOPES: [&str; 2] = ["push", "notifications"];

/// Read-only access to user API keys.
#[derive(Clone)]
pub struct UserApiKeyRepository {
    db: Arc<DatabaseConnection>,
}

impl UserApiKeyRepository {
    /// Create a new user API key repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find `(client_id, push_url)` pairs for clients that should receive
    /// pushes for the user.
    ///
    /// A key qualifies when it holds a push scope, is not revoked and has a
    /// non-empty push URL occurring in `allowed_push_urls`. Results are
    /// ordered by client id.
    pub async fn find_push_clients(
        &self,
        user_id: i64,
        allowed_push_urls: &str,
    ) -> AppResult<Vec<(String, String)>> {
        let keys = user_api_key::Entity::find()
            .join(JoinType::InnerJoin, user_api_key::Relation::Scopes.def())
            .filter(user_api_key::Column::UserId.eq(user_id))
            .filter(user_api_key_scope::Column::Name.is_in(PUSH_SCOPES))
            .filter(user_api_key::Column::PushUrl.is_not_null())
            .filter(user_api_key::Column::PushUrl.ne(""))
            .filter(Expr::cust_with_values(
                "position(push_url IN ?) > 0",
                [allowed_push_urls],
            ))
            .filter(user_api_key::Column::RevokedAt.is_null())
            .order_by_asc(user_api_key::Column::ClientId)
            .order_by_asc(user_api_key::Column::PushUrl)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut clients: Vec<(String, String)> = keys
            .into_iter()
            .filter_map(|key| match key.push_url {
                Some(url) if !url.is_empty() => Some((key.client_id, url)),
                _ => None,
            })
            .collect();
        // A key holding both push scopes joins twice
        clients.dedup();

        Ok(clients)
    }
}
