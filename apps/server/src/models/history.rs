//! Item history: content snapshots written on every item change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::item_history;
use crate::error::{AppError, AppResult};

/// What happened to the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ChangeType {
    #[serde(rename = "CREATE")]
    Create,
    #[serde(rename = "UPDATE")]
    Update,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREATE" => Some(Self::Create),
            "UPDATE" => Some(Self::Update),
            _ => None,
        }
    }
}

/// One history entry. Snapshots have the same shape as the item response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemHistoryEntry {
    pub id: i32,
    pub item_id: i32,
    pub change_type: ChangeType,
    /// Content before the change; null for CREATE.
    #[schema(value_type = Option<Object>)]
    pub old_content: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub new_content: serde_json::Value,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

impl ItemHistoryEntry {
    pub fn from_entity(model: item_history::Model) -> AppResult<Self> {
        let change_type = ChangeType::parse(&model.change_type).ok_or_else(|| {
            AppError::Database(format!(
                "History entry {} has unknown change type '{}'",
                model.id, model.change_type
            ))
        })?;

        Ok(Self {
            id: model.id,
            item_id: model.item_id,
            change_type,
            old_content: model.old_content,
            new_content: model.new_content,
            changed_by: model.changed_by,
            changed_at: model.changed_at,
        })
    }
}

/// History of one item, oldest entry first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemHistoryResponse {
    pub item_id: i32,
    pub entries: Vec<ItemHistoryEntry>,
}
