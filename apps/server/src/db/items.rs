//! Database queries for FMEA and CP items.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entity::cp_item::{self, Entity as CpItemEntity};
use crate::entity::fmea_item::{self, Entity as FmeaItemEntity};
use crate::entity::item::{self, Entity as ItemEntity};
use crate::error::{AppError, AppResult};
use crate::models::{
    ChangeType, CpItem, DocumentKind, FmeaItem, Item, ItemKind, ItemRows, UpdateItemRequest,
    ValidCpRow, ValidFmeaRow, ValidRows,
};

use super::documents::find_document;
use super::history::record_item_change;
use super::{DbPool, required_text};

fn set_fmea_content(active: &mut fmea_item::ActiveModel, row: ValidFmeaRow) {
    active.process_step = Set(row.process_step);
    active.process_function = Set(row.process_function);
    active.process_item = Set(row.process_item);
    active.process_item_function = Set(row.process_item_function);
    active.work_element = Set(row.work_element);
    active.work_element_function = Set(row.work_element_function);
    active.failure_effects = Set(row.failure_effects);
    active.failure_mode = Set(row.failure_mode);
    active.failure_cause = Set(row.failure_cause);
    active.severity = Set(row.severity);
    active.occurrence = Set(row.occurrence);
    active.detection = Set(row.detection);
    active.action_priority = Set(row.action_priority.map(|ap| ap.as_str().to_string()));
    active.prevention_controls = Set(row.prevention_controls);
    active.detection_controls = Set(row.detection_controls);
    active.prevention_action = Set(row.prevention_action);
    active.detection_action = Set(row.detection_action);
    active.responsible_person = Set(row.responsible_person);
    active.target_completion_date = Set(row.target_completion_date);
    active.status = Set(row.status);
    active.action_taken = Set(row.action_taken);
    active.completion_date = Set(row.completion_date);
    active.post_severity = Set(row.post_severity);
    active.post_occurrence = Set(row.post_occurrence);
    active.post_detection = Set(row.post_detection);
    active.post_action_priority =
        Set(row.post_action_priority.map(|ap| ap.as_str().to_string()));
    active.remarks = Set(row.remarks);
}

fn set_cp_content(active: &mut cp_item::ActiveModel, row: ValidCpRow) {
    active.process_name = Set(row.process_name);
    active.product_characteristic = Set(row.product_characteristic);
    active.process_characteristic = Set(row.process_characteristic);
    active.evaluation_technique = Set(row.evaluation_technique);
    active.control_method = Set(row.control_method);
    active.spec_tolerance = Set(row.spec_tolerance);
    active.sample_size = Set(row.sample_size);
    active.sample_frequency = Set(row.sample_frequency);
    active.special_characteristic_class = Set(row.special_characteristic_class);
    active.equipment = Set(row.equipment);
    active.reaction_plan = Set(row.reaction_plan);
}

/// Allocate an id in the shared item id space.
async fn allocate_item_id<C: ConnectionTrait>(
    conn: &C,
    document_id: i32,
    kind: ItemKind,
) -> AppResult<i32> {
    let slot = item::ActiveModel {
        id: NotSet,
        document_id: Set(document_id),
        item_kind: Set(kind.as_str().to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
    .map_err(|e| AppError::Database(format!("Failed to allocate item id: {}", e)))?;

    Ok(slot.id)
}

/// Write already validated rows for a document, with a CREATE history entry
/// per item. Callers own the transaction.
pub(crate) async fn insert_valid_rows<C: ConnectionTrait>(
    conn: &C,
    document_id: i32,
    rows: ValidRows,
    created_by: &str,
) -> AppResult<Vec<Item>> {
    let now = Utc::now();
    let mut items = Vec::new();

    match rows {
        ValidRows::Empty => {}
        ValidRows::Fmea(rows) => {
            for row in rows {
                let id = allocate_item_id(conn, document_id, ItemKind::Fmea).await?;
                let mut active = fmea_item::ActiveModel {
                    id: Set(id),
                    document_id: Set(document_id),
                    row_index: Set(row.row_index),
                    edited_by: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                set_fmea_content(&mut active, row);

                let model = active
                    .insert(conn)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to insert FMEA item: {}", e)))?;
                items.push(Item::Fmea(FmeaItem::from_entity(model)));
            }
        }
        ValidRows::Cp(rows) => {
            for row in rows {
                let id = allocate_item_id(conn, document_id, ItemKind::Cp).await?;
                let mut active = cp_item::ActiveModel {
                    id: Set(id),
                    document_id: Set(document_id),
                    row_index: Set(row.row_index),
                    edited_by: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                set_cp_content(&mut active, row);

                let model = active
                    .insert(conn)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to insert CP item: {}", e)))?;
                items.push(Item::Cp(CpItem::from_entity(model)));
            }
        }
    }

    for item in &items {
        record_item_change(conn, ChangeType::Create, None, item, created_by).await?;
    }

    Ok(items)
}

/// Kind of the item with this id, or None when no item has it.
pub(crate) async fn find_item_kind<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<Option<ItemKind>> {
    let slot = ItemEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get item: {}", e)))?;

    slot.map(|s| {
        ItemKind::parse(&s.item_kind).ok_or_else(|| {
            AppError::Database(format!("Item {} has unknown stored kind '{}'", id, s.item_kind))
        })
    })
    .transpose()
}

/// Require that `id` names an item of `expected` kind.
///
/// NotFound when no item has the id; Validation when it is the other kind.
pub(crate) async fn expect_item_kind<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    expected: ItemKind,
) -> AppResult<()> {
    match find_item_kind(conn, id).await? {
        None => Err(AppError::NotFound(format!("{} {}", expected.label(), id))),
        Some(kind) if kind != expected => Err(AppError::Validation(format!(
            "Item {} is a {}, expected a {}",
            id,
            kind.label(),
            expected.label()
        ))),
        Some(_) => Ok(()),
    }
}

pub(crate) async fn find_fmea_item<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<fmea_item::Model> {
    FmeaItemEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get FMEA item: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("FMEA item {}", id)))
}

async fn find_cp_item<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<cp_item::Model> {
    CpItemEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get CP item: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("CP item {}", id)))
}

impl DbPool {
    /// Store a batch of rows for an existing document.
    ///
    /// The batch must match the document kind. All rows are validated before
    /// the first write and the batch is written in one transaction.
    pub async fn bulk_insert_items(
        &self,
        document_id: i32,
        rows: ItemRows,
        created_by: &str,
    ) -> AppResult<Vec<Item>> {
        let created_by = required_text("created_by", created_by)?;
        let document = find_document(self.connection(), document_id).await?;
        let kind = DocumentKind::parse(&document.document_kind).ok_or_else(|| {
            AppError::Database(format!(
                "Document {} has unknown stored kind '{}'",
                document_id, document.document_kind
            ))
        })?;

        let rows = rows.validate_for(kind)?;

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let items = insert_valid_rows(&txn, document_id, rows, &created_by).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit items: {}", e)))?;

        info!(document_id, count = items.len(), created_by = %created_by, "Inserted items");
        Ok(items)
    }

    /// Items of a document ordered by row index, ties by id.
    pub async fn get_items_for_document(&self, document_id: i32) -> AppResult<Vec<Item>> {
        let document = find_document(self.connection(), document_id).await?;

        match DocumentKind::parse(&document.document_kind) {
            Some(DocumentKind::Fmea) => Ok(self
                .get_fmea_items_for_document(document_id)
                .await?
                .into_iter()
                .map(Item::Fmea)
                .collect()),
            Some(DocumentKind::Cp) => {
                let models = CpItemEntity::find()
                    .filter(cp_item::Column::DocumentId.eq(document_id))
                    .order_by_asc(cp_item::Column::RowIndex)
                    .order_by_asc(cp_item::Column::Id)
                    .all(self.connection())
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to get CP items: {}", e)))?;
                Ok(models
                    .into_iter()
                    .map(|m| Item::Cp(CpItem::from_entity(m)))
                    .collect())
            }
            Some(DocumentKind::Oi) => Ok(Vec::new()),
            None => Err(AppError::Database(format!(
                "Document {} has unknown stored kind '{}'",
                document_id, document.document_kind
            ))),
        }
    }

    /// FMEA items of a document in row order.
    pub async fn get_fmea_items_for_document(&self, document_id: i32) -> AppResult<Vec<FmeaItem>> {
        let models = FmeaItemEntity::find()
            .filter(fmea_item::Column::DocumentId.eq(document_id))
            .order_by_asc(fmea_item::Column::RowIndex)
            .order_by_asc(fmea_item::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get FMEA items: {}", e)))?;

        Ok(models.into_iter().map(FmeaItem::from_entity).collect())
    }

    /// Get an item of either kind by ID.
    pub async fn get_item(&self, id: i32) -> AppResult<Item> {
        match find_item_kind(self.connection(), id).await? {
            Some(ItemKind::Fmea) => Ok(Item::Fmea(FmeaItem::from_entity(
                find_fmea_item(self.connection(), id).await?,
            ))),
            Some(ItemKind::Cp) => Ok(Item::Cp(CpItem::from_entity(
                find_cp_item(self.connection(), id).await?,
            ))),
            None => Err(AppError::NotFound(format!("Item {}", id))),
        }
    }

    /// Get an FMEA item; Validation when the id belongs to a CP item.
    pub async fn get_fmea_item(&self, id: i32) -> AppResult<FmeaItem> {
        expect_item_kind(self.connection(), id, ItemKind::Fmea).await?;
        Ok(FmeaItem::from_entity(find_fmea_item(self.connection(), id).await?))
    }

    /// Replace the editable content of an item and record the editor.
    ///
    /// The item keeps its id, document, row index and creation time. The
    /// update and its history entry share one transaction.
    pub async fn update_item(
        &self,
        id: i32,
        request: UpdateItemRequest,
        edited_by: &str,
    ) -> AppResult<Item> {
        let edited_by = required_text("edited_by", edited_by)?;

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let stored = find_item_kind(&txn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {}", id)))?;
        if stored != request.kind() {
            return Err(AppError::Validation(format!(
                "Item {} is a {}, cannot apply {} content",
                id,
                stored.label(),
                request.kind()
            )));
        }

        let now = Utc::now();
        let (previous, item) = match request {
            UpdateItemRequest::Fmea(row) => {
                let existing = find_fmea_item(&txn, id).await?;
                let row = row.validate(existing.row_index as usize)?;
                let previous = Item::Fmea(FmeaItem::from_entity(existing.clone()));
                let mut active: fmea_item::ActiveModel = existing.into();
                set_fmea_content(&mut active, row);
                active.edited_by = Set(Some(edited_by.clone()));
                active.updated_at = Set(now);

                let model = active
                    .update(&txn)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to update FMEA item: {}", e)))?;
                (previous, Item::Fmea(FmeaItem::from_entity(model)))
            }
            UpdateItemRequest::Cp(row) => {
                let existing = find_cp_item(&txn, id).await?;
                let row = row.validate(existing.row_index as usize)?;
                let previous = Item::Cp(CpItem::from_entity(existing.clone()));
                let mut active: cp_item::ActiveModel = existing.into();
                set_cp_content(&mut active, row);
                active.edited_by = Set(Some(edited_by.clone()));
                active.updated_at = Set(now);

                let model = active
                    .update(&txn)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to update CP item: {}", e)))?;
                (previous, Item::Cp(CpItem::from_entity(model)))
            }
        };

        record_item_change(&txn, ChangeType::Update, Some(&previous), &item, &edited_by).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit item update: {}", e)))?;

        info!(item_id = id, edited_by = %edited_by, "Updated item");
        Ok(item)
    }

    /// CP items from every CP document, excluding the given ids, in id order.
    pub async fn list_cp_items_excluding(&self, excluded: &[i32]) -> AppResult<Vec<CpItem>> {
        let mut query = CpItemEntity::find();
        if !excluded.is_empty() {
            query = query.filter(cp_item::Column::Id.is_not_in(excluded.iter().copied()));
        }

        let models = query
            .order_by_asc(cp_item::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list CP items: {}", e)))?;

        Ok(models.into_iter().map(CpItem::from_entity).collect())
    }
}
