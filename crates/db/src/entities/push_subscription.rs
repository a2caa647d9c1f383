//! Browser push subscription entity.
//!
//! Owned by the forum; delivery for these rows is done by the forum's own
//! `send_push_notification` job.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Browser push subscription entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "push_subscriptions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,

    /// User ID
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// Serialized subscription (endpoint and keys)
    #[sea_orm(column_type = "Text")]
    pub data: String,

    /// Timestamp when the subscription was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the subscription was last updated
    pub updated_at: DateTimeWithTimeZone,
}

/// Relations for push subscription.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_user::Entity",
        from = "Column::UserId",
        to = "super::forum_user::Column::Id"
    )]
    User,
}

impl Related<super::forum_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
