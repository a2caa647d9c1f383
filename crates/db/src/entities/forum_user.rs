//! Forum user entity.
//!
//! The table is owned by the forum; only the columns needed for push
//! dispatch are mapped.

use chrono::{DateTime, FixedOffset};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Forum user entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Username
    pub username: String,

    /// End of the user's current do-not-disturb window
    #[sea_orm(nullable)]
    pub do_not_disturb_until: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Whether the user is in do-not-disturb at the given instant.
    #[must_use]
    pub fn is_do_not_disturb_at(&self, now: DateTime<FixedOffset>) -> bool {
        self.do_not_disturb_until.is_some_and(|until| until > now)
    }
}

/// Relations for forum user.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::push_subscription::Entity")]
    PushSubscriptions,
    #[sea_orm(has_many = "super::onesignal_subscription::Entity")]
    OnesignalSubscriptions,
    #[sea_orm(has_many = "super::user_api_key::Entity")]
    UserApiKeys,
}

impl Related<super::push_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PushSubscriptions.def()
    }
}

impl Related<super::onesignal_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OnesignalSubscriptions.def()
    }
}

impl Related<super::user_api_key::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserApiKeys.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
