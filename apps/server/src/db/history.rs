//! Database queries for the item history log.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::item_history::{self, Entity as ItemHistoryEntity};
use crate::error::{AppError, AppResult};
use crate::models::{ChangeType, Item, ItemHistoryEntry};

use super::DbPool;
use super::items::find_item_kind;

/// Append a history entry for `item`. Callers own the transaction.
pub(crate) async fn record_item_change<C: ConnectionTrait>(
    conn: &C,
    change_type: ChangeType,
    previous: Option<&Item>,
    item: &Item,
    changed_by: &str,
) -> AppResult<()> {
    let snapshot = |item: &Item| {
        serde_json::to_value(item)
            .map_err(|e| AppError::Database(format!("Failed to snapshot item {}: {}", item.id(), e)))
    };
    let old_content = previous.map(snapshot).transpose()?;
    let new_content = snapshot(item)?;

    item_history::ActiveModel {
        id: NotSet,
        item_id: Set(item.id()),
        change_type: Set(change_type.as_str().to_string()),
        old_content: Set(old_content),
        new_content: Set(new_content),
        changed_by: Set(changed_by.to_string()),
        changed_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
    .map_err(|e| AppError::Database(format!("Failed to record item history: {}", e)))?;

    Ok(())
}

impl DbPool {
    /// History of an item, oldest entry first.
    pub async fn get_item_history(&self, item_id: i32) -> AppResult<Vec<ItemHistoryEntry>> {
        if find_item_kind(self.connection(), item_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Item {}", item_id)));
        }

        ItemHistoryEntity::find()
            .filter(item_history::Column::ItemId.eq(item_id))
            .order_by_asc(item_history::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get item history: {}", e)))?
            .into_iter()
            .map(ItemHistoryEntry::from_entity)
            .collect()
    }
}
