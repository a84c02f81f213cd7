//! Create documents table.
//!
//! One row per uploaded FMEA / CP / OI file.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::FileName).string_len(255).not_null())
                    .col(ColumnDef::new(Documents::DocumentKind).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Documents::Version)
                            .string_len(50)
                            .not_null()
                            .default("1.0"),
                    )
                    .col(ColumnDef::new(Documents::UploadedBy).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Documents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_kind")
                    .table(Documents::Table)
                    .col(Documents::DocumentKind)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Documents {
    Table,
    Id,
    FileName,
    DocumentKind,
    Version,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
}
