//! User API key entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user API key issued to an external client application.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_api_keys")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,

    /// User ID
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// Client identifier chosen by the application
    pub client_id: String,

    /// Application name shown to the user
    pub application_name: String,

    /// URL the client wants pushes delivered to
    #[sea_orm(nullable)]
    pub push_url: Option<String>,

    /// Revocation timestamp
    #[sea_orm(nullable)]
    pub revoked_at: Option<DateTimeWithTimeZone>,
}

/// Relations for user API key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_user::Entity",
        from = "Column::UserId",
        to = "super::forum_user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::user_api_key_scope::Entity")]
    Scopes,
}

impl Related<super::forum_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::user_api_key_scope::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scopes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
