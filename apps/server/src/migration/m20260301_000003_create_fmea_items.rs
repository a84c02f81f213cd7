//! Create fmea_items table.
//!
//! One row per failure-mode line of an FMEA worksheet, with typed columns.

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
                    .table(FmeaItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FmeaItems::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FmeaItems::DocumentId).integer().not_null())
                    .col(ColumnDef::new(FmeaItems::RowIndex).integer().not_null())
                    // Structure analysis
                    .col(ColumnDef::new(FmeaItems::ProcessStep).text())
                    .col(ColumnDef::new(FmeaItems::ProcessFunction).text())
                    .col(ColumnDef::new(FmeaItems::ProcessItem).text())
                    .col(ColumnDef::new(FmeaItems::ProcessItemFunction).text())
                    .col(ColumnDef::new(FmeaItems::WorkElement).text())
                    .col(ColumnDef::new(FmeaItems::WorkElementFunction).text())
                    // Failure analysis
                    .col(ColumnDef::new(FmeaItems::FailureEffects).text())
                    .col(ColumnDef::new(FmeaItems::FailureMode).text())
                    .col(ColumnDef::new(FmeaItems::FailureCause).text())
                    // Risk analysis
                    .col(ColumnDef::new(FmeaItems::Severity).small_integer())
                    .col(ColumnDef::new(FmeaItems::Occurrence).small_integer())
                    .col(ColumnDef::new(FmeaItems::Detection).small_integer())
                    .col(ColumnDef::new(FmeaItems::ActionPriority).string_len(1))
                    .col(ColumnDef::new(FmeaItems::PreventionControls).text())
                    .col(ColumnDef::new(FmeaItems::DetectionControls).text())
                    // Optimization
                    .col(ColumnDef::new(FmeaItems::PreventionAction).text())
                    .col(ColumnDef::new(FmeaItems::DetectionAction).text())
                    .col(ColumnDef::new(FmeaItems::ResponsiblePerson).string_len(100))
                    .col(ColumnDef::new(FmeaItems::TargetCompletionDate).date())
                    .col(ColumnDef::new(FmeaItems::Status).string_len(50))
                    .col(ColumnDef::new(FmeaItems::ActionTaken).text())
                    .col(ColumnDef::new(FmeaItems::CompletionDate).date())
                    .col(ColumnDef::new(FmeaItems::PostSeverity).small_integer())
                    .col(ColumnDef::new(FmeaItems::PostOccurrence).small_integer())
                    .col(ColumnDef::new(FmeaItems::PostDetection).small_integer())
                    .col(ColumnDef::new(FmeaItems::PostActionPriority).string_len(1))
                    .col(ColumnDef::new(FmeaItems::Remarks).text())
                    // Audit
                    .col(ColumnDef::new(FmeaItems::EditedBy).string_len(100))
                    .col(
                        ColumnDef::new(FmeaItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FmeaItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fmea_items_item")
                            .from(FmeaItems::Table, FmeaItems::Id)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fmea_items_document")
                            .from(FmeaItems::Table, FmeaItems::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Spreadsheet order within a document
        manager
            .create_index(
                Index::create()
                    .name("idx_fmea_items_document_row")
                    .table(FmeaItems::Table)
                    .col(FmeaItems::DocumentId)
                    .col(FmeaItems::RowIndex)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FmeaItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FmeaItems {
    Table,
    Id,
    DocumentId,
    RowIndex,
    ProcessStep,
    ProcessFunction,
    ProcessItem,
    ProcessItemFunction,
    WorkElement,
    WorkElementFunction,
    FailureEffects,
    FailureMode,
    FailureCause,
    Severity,
    Occurrence,
    Detection,
    ActionPriority,
    PreventionControls,
    DetectionControls,
    PreventionAction,
    DetectionAction,
    ResponsiblePerson,
    TargetCompletionDate,
    Status,
    ActionTaken,
    CompletionDate,
    PostSeverity,
    PostOccurrence,
    PostDetection,
    PostActionPriority,
    Remarks,
    EditedBy,
    CreatedAt,
    UpdatedAt,
}
