//! Migration: Create galleries table.
//!
//! `user_id` is indexed and carries no foreign key; removing a
//! user does not cascade to their galleries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Galleries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Galleries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Galleries::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Galleries::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Galleries::DeletedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Galleries::Title).string().not_null())
                    .col(ColumnDef::new(Galleries::UserId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_galleries_user_id")
                    .table(Galleries::Table)
                    .col(Galleries::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_galleries_deleted_at")
                    .table(Galleries::Table)
                    .col(Galleries::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Galleries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Galleries {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    Title,
    UserId,
}
