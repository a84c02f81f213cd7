//! AI association suggestion DTOs. Suggestions are never persisted.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item::CpItem;

/// One suggested CP item, best first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestedCpItem {
    /// 1-based rank in the provider's answer.
    pub rank: usize,
    pub cp_item: CpItem,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    pub fmea_item_id: i32,
    pub message: String,
    pub suggestions: Vec<SuggestedCpItem>,
    /// Number of CP items the provider could choose from.
    pub candidate_count: usize,
    /// Provider answer before parsing, absent when no call was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}
