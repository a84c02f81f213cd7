//! Create fmea_fe_items table.
//!
//! Failure-effect options of an FMEA document, each with the severity the
//! effect carries. Rows cascade with their document.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_documents::Documents;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FmeaFeItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FmeaFeItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FmeaFeItems::DocumentId).integer().not_null())
                    .col(ColumnDef::new(FmeaFeItems::FailureEffect).text().not_null())
                    .col(ColumnDef::new(FmeaFeItems::Severity).small_integer().not_null())
                    .col(
                        ColumnDef::new(FmeaFeItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FmeaFeItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fmea_fe_items_document")
                            .from(FmeaFeItems::Table, FmeaFeItems::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fmea_fe_items_document_id")
                    .table(FmeaFeItems::Table)
                    .col(FmeaFeItems::DocumentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FmeaFeItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FmeaFeItems {
    Table,
    Id,
    DocumentId,
    FailureEffect,
    Severity,
    CreatedAt,
    UpdatedAt,
}
