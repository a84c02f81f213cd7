//! FMEA export: each FMEA row with the CP rows linked to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::association::LinkedCpItem;
use super::document::Document;
use super::item::FmeaItem;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FmeaExportRow {
    #[serde(flatten)]
    pub fmea_item: FmeaItem,
    pub linked_cp_items: Vec<LinkedCpItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FmeaExport {
    pub document: Document,
    pub exported_at: DateTime<Utc>,
    pub rows: Vec<FmeaExportRow>,
}
