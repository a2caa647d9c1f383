//! User API key scope entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A scope granted to a user API key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_api_key_scopes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning key
    #[sea_orm(indexed)]
    pub user_api_key_id: i64,

    /// Scope name (`push`, `notifications`, `read`, ...)
    pub name: String,
}

/// Relations for user API key scope.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_api_key::Entity",
        from = "Column::UserApiKeyId",
        to = "super::user_api_key::Column::Id"
    )]
    UserApiKey,
}

impl Related<super::user_api_key::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserApiKey.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
