//! Create item_history table.
//!
//! Append-only audit log of item content. `old_content` is null for the
//! CREATE entry; both snapshots are stored as JSONB.

use sea_orm_migration::prelude::*;

use super::m20260301_000002_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ItemHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ItemHistory::ItemId).integer().not_null())
                    .col(ColumnDef::new(ItemHistory::ChangeType).string_len(10).not_null())
                    .col(ColumnDef::new(ItemHistory::OldContent).json_binary())
                    .col(ColumnDef::new(ItemHistory::NewContent).json_binary().not_null())
                    .col(ColumnDef::new(ItemHistory::ChangedBy).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ItemHistory::ChangedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_history_item")
                            .from(ItemHistory::Table, ItemHistory::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_history_item_id")
                    .table(ItemHistory::Table)
                    .col(ItemHistory::ItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ItemHistory {
    Table,
    Id,
    ItemId,
    ChangeType,
    OldContent,
    NewContent,
    ChangedBy,
    ChangedAt,
}
