//! Database queries for the document registry.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entity::document::{self, ActiveModel, Entity as DocumentEntity};
use crate::entity::item::{self, Entity as ItemEntity};
use crate::error::{AppError, AppResult};
use crate::models::document::DEFAULT_VERSION;
use crate::models::failure_effect::validate_failure_effects;
use crate::models::{Document, DocumentKind, Item, RegisterDocumentRequest, ValidRows};

use super::failure_effects::{insert_failure_effects, require_fmea};
use super::items::insert_valid_rows;
use super::{DbPool, required_text};

/// Load a document model or fail with NotFound.
pub(crate) async fn find_document<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<document::Model> {
    DocumentEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get document: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("Document {}", id)))
}

impl DbPool {
    /// Register a document and, when given, store its rows in the same transaction.
    ///
    /// Every row is validated before anything is written.
    pub async fn register_document(
        &self,
        request: RegisterDocumentRequest,
        uploaded_by: &str,
    ) -> AppResult<(Document, Vec<Item>)> {
        let file_name = required_text("file_name", &request.file_name)?;
        let uploaded_by = required_text("uploaded_by", uploaded_by)?;
        let kind = DocumentKind::parse_input(&request.document_type)?;
        let version = request
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let rows = match request.rows {
            Some(rows) => rows.validate_for(kind)?,
            None => ValidRows::Empty,
        };
        let failure_effects = match request.failure_effects {
            Some(rows) => {
                require_fmea(kind)?;
                validate_failure_effects(rows)?
            }
            None => Vec::new(),
        };

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let now = Utc::now();
        let model = ActiveModel {
            id: NotSet,
            file_name: Set(file_name),
            document_kind: Set(kind.as_str().to_string()),
            version: Set(version),
            uploaded_by: Set(uploaded_by.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert document: {}", e)))?;

        let items = insert_valid_rows(&txn, model.id, rows, &uploaded_by).await?;
        let effects = insert_failure_effects(&txn, model.id, failure_effects).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit document: {}", e)))?;

        info!(
            document_id = model.id,
            kind = %kind,
            items = items.len(),
            failure_effects = effects.len(),
            "Registered document '{}'",
            model.file_name
        );

        Ok((Document::from_entity(model)?, items))
    }

    /// Get a document by ID.
    pub async fn get_document(&self, id: i32) -> AppResult<Document> {
        Document::from_entity(find_document(self.connection(), id).await?)
    }

    /// List documents in insertion order, optionally filtered by kind.
    pub async fn list_documents(&self, kind: Option<DocumentKind>) -> AppResult<Vec<Document>> {
        let mut query = DocumentEntity::find();
        if let Some(kind) = kind {
            query = query.filter(document::Column::DocumentKind.eq(kind.as_str()));
        }

        query
            .order_by_asc(document::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list documents: {}", e)))?
            .into_iter()
            .map(Document::from_entity)
            .collect()
    }

    /// Number of items stored for a document.
    pub async fn count_items(&self, document_id: i32) -> AppResult<u64> {
        ItemEntity::find()
            .filter(item::Column::DocumentId.eq(document_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count items: {}", e)))
    }

    /// Delete a document. Items, their history and associations, and the
    /// failure effects go with it.
    pub async fn delete_document(&self, id: i32) -> AppResult<()> {
        let result = DocumentEntity::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete document: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Document {}", id)));
        }

        info!(document_id = id, "Deleted document");
        Ok(())
    }
}
