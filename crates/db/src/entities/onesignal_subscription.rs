//! OneSignal subscription entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A OneSignal player (device) registered for a forum user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "onesignal_subscriptions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,

    /// User ID
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// OneSignal player id
    pub player_id: String,

    /// Timestamp when the subscription was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the subscription was last updated
    pub updated_at: DateTimeWithTimeZone,
}

/// Relations for OneSignal subscription.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_user::Entity",
        from = "Column::UserId",
        to = "super::forum_user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::forum_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
