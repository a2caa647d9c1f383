//! Create onesignal_subscriptions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OnesignalSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OnesignalSubscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OnesignalSubscriptions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnesignalSubscriptions::PlayerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnesignalSubscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnesignalSubscriptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_onesignal_subscriptions_user")
                            .from(OnesignalSubscriptions::Table, OnesignalSubscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per device and user
        manager
            .create_index(
                Index::create()
                    .name("idx_onesignal_subscriptions_user_player")
                    .table(OnesignalSubscriptions::Table)
                    .col(OnesignalSubscriptions::UserId)
                    .col(OnesignalSubscriptions::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OnesignalSubscriptions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum OnesignalSubscriptions {
    Table,
    Id,
    UserId,
    PlayerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
