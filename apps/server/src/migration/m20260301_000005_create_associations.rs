//! Create associations table.
//!
//! Confirmed FMEA item <-> CP item links. The (fmea_item_id, cp_item_id)
//! pair is unique and both sides cascade on item deletion.

use sea_orm_migration::prelude::*;

use super::m20260301_000003_create_fmea_items::FmeaItems;
use super::m20260301_000004_create_cp_items::CpItems;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Associations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Associations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Associations::FmeaItemId).integer().not_null())
                    .col(ColumnDef::new(Associations::CpItemId).integer().not_null())
                    .col(ColumnDef::new(Associations::CreatedBy).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Associations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_associations_fmea_item")
                            .from(Associations::Table, Associations::FmeaItemId)
                            .to(FmeaItems::Table, FmeaItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_associations_cp_item")
                            .from(Associations::Table, Associations::CpItemId)
                            .to(CpItems::Table, CpItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_associations_pair")
                    .table(Associations::Table)
                    .col(Associations::FmeaItemId)
                    .col(Associations::CpItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Reverse lookup and cascade support from the CP side
        manager
            .create_index(
                Index::create()
                    .name("idx_associations_cp_item_id")
                    .table(Associations::Table)
                    .col(Associations::CpItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Associations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Associations {
    Table,
    Id,
    FmeaItemId,
    CpItemId,
    CreatedBy,
    CreatedAt,
}
