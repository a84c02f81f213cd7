//! Association models: confirmed FMEA to CP links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::association;

use super::item::CpItem;

/// A confirmed link between one FMEA item and one CP item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Association {
    pub id: i32,
    pub fmea_item_id: i32,
    pub cp_item_id: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<association::Model> for Association {
    fn from(model: association::Model) -> Self {
        Self {
            id: model.id,
            fmea_item_id: model.fmea_item_id,
            cp_item_id: model.cp_item_id,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}

/// Request to link an FMEA item to one or more CP items.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAssociationsRequest {
    pub fmea_item_id: i32,
    pub cp_item_ids: Vec<i32>,
}

/// Associations of one FMEA item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssociationListResponse {
    pub fmea_item_id: i32,
    pub associations: Vec<Association>,
}

/// An association together with the linked CP item, for export and review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkedCpItem {
    pub association_id: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub cp_item: CpItem,
}
