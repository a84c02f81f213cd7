//! Database queries for FMEA failure-effect options.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entity::document;
use crate::entity::fmea_fe_item::{self, Entity as FailureEffectEntity};
use crate::error::{AppError, AppResult};
use crate::models::failure_effect::validate_failure_effects;
use crate::models::{DocumentKind, FailureEffectOption, FailureEffectRow, ValidFailureEffect};

use super::DbPool;
use super::documents::find_document;

/// Failure effects exist only for FMEA documents.
pub(crate) fn require_fmea(kind: DocumentKind) -> AppResult<()> {
    if kind != DocumentKind::Fmea {
        return Err(AppError::Validation(
            "Failure Effects are only defined for FMEA documents".to_string(),
        ));
    }
    Ok(())
}

/// Load a document and check that it is an FMEA document.
async fn find_fmea_document<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<document::Model> {
    let document = find_document(conn, id).await?;
    let kind = DocumentKind::parse(&document.document_kind).ok_or_else(|| {
        AppError::Database(format!(
            "Document {} has unknown stored kind '{}'",
            id, document.document_kind
        ))
    })?;
    require_fmea(kind)?;
    Ok(document)
}

/// Write validated failure effects. Callers own the transaction.
pub(crate) async fn insert_failure_effects<C: ConnectionTrait>(
    conn: &C,
    document_id: i32,
    rows: Vec<ValidFailureEffect>,
) -> AppResult<Vec<FailureEffectOption>> {
    let now = Utc::now();
    let mut options = Vec::with_capacity(rows.len());

    for row in rows {
        let model = fmea_fe_item::ActiveModel {
            id: NotSet,
            document_id: Set(document_id),
            failure_effect: Set(row.failure_effect),
            severity: Set(row.severity),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert failure effect: {}", e)))?;
        options.push(FailureEffectOption::from(model));
    }

    Ok(options)
}

impl DbPool {
    /// Store failure-effect options for an existing FMEA document.
    ///
    /// Every row is validated before the first write; the batch shares one transaction.
    pub async fn add_failure_effects(
        &self,
        document_id: i32,
        rows: Vec<FailureEffectRow>,
    ) -> AppResult<Vec<FailureEffectOption>> {
        find_fmea_document(self.connection(), document_id).await?;
        let rows = validate_failure_effects(rows)?;

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let options = insert_failure_effects(&txn, document_id, rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit failure effects: {}", e)))?;

        info!(document_id, count = options.len(), "Inserted failure effects");
        Ok(options)
    }

    /// Failure-effect options of an FMEA document, highest severity first,
    /// ties by effect text.
    pub async fn list_failure_effects(&self, document_id: i32) -> AppResult<Vec<FailureEffectOption>> {
        find_fmea_document(self.connection(), document_id).await?;

        let models = FailureEffectEntity::find()
            .filter(fmea_fe_item::Column::DocumentId.eq(document_id))
            .order_by_desc(fmea_fe_item::Column::Severity)
            .order_by_asc(fmea_fe_item::Column::FailureEffect)
            .order_by_asc(fmea_fe_item::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list failure effects: {}", e)))?;

        Ok(models.into_iter().map(FailureEffectOption::from).collect())
    }
}
