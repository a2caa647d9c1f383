//! Database migrations.
//!
//! Only the tables owned by forumpush are migrated here. Migration state is
//! tracked in its own table so it never collides with the forum's.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_onesignal_subscription_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migration_table_name() -> DynIden {
        Alias::new("forumpush_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250101_000001_create_onesignal_subscription_table::Migration,
        )]
    }
}
