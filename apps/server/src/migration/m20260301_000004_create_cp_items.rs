//! Create cp_items table.
//!
//! One row per characteristic line of a Control Plan.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_documents::Documents;
use super::m20260301_000002_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CpItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CpItems::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CpItems::DocumentId).integer().not_null())
                    .col(ColumnDef::new(CpItems::RowIndex).integer().not_null())
                    .col(ColumnDef::new(CpItems::ProcessName).text())
                    .col(ColumnDef::new(CpItems::ProductCharacteristic).text())
                    .col(ColumnDef::new(CpItems::ProcessCharacteristic).text())
                    .col(ColumnDef::new(CpItems::EvaluationTechnique).text())
                    .col(ColumnDef::new(CpItems::ControlMethod).text())
                    .col(ColumnDef::new(CpItems::SpecTolerance).text())
                    .col(ColumnDef::new(CpItems::SampleSize).string_len(100))
                    .col(ColumnDef::new(CpItems::SampleFrequency).string_len(100))
                    .col(ColumnDef::new(CpItems::SpecialCharacteristicClass).string_len(50))
                    .col(ColumnDef::new(CpItems::Equipment).text())
                    .col(ColumnDef::new(CpItems::ReactionPlan).text())
                    .col(ColumnDef::new(CpItems::EditedBy).string_len(100))
                    .col(
                        ColumnDef::new(CpItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CpItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cp_items_item")
                            .from(CpItems::Table, CpItems::Id)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cp_items_document")
                            .from(CpItems::Table, CpItems::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cp_items_document_row")
                    .table(CpItems::Table)
                    .col(CpItems::DocumentId)
                    .col(CpItems::RowIndex)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CpItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CpItems {
    Table,
    Id,
    DocumentId,
    RowIndex,
    ProcessName,
    ProductCharacteristic,
    ProcessCharacteristic,
    EvaluationTechnique,
    ControlMethod,
    SpecTolerance,
    SampleSize,
    SampleFrequency,
    SpecialCharacteristicClass,
    Equipment,
    ReactionPlan,
    EditedBy,
    CreatedAt,
    UpdatedAt,
}
