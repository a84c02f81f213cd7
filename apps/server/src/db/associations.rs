//! Database queries for the association ledger.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entity::association::{self, ActiveModel, Entity as AssociationEntity};
use crate::entity::cp_item::{self, Entity as CpItemEntity};
use crate::entity::fmea_item::{self, Entity as FmeaItemEntity};
use crate::error::{AppError, AppResult};
use crate::models::{
    Association, CpItem, DocumentKind, FmeaExport, FmeaExportRow, FmeaItem, ItemKind,
    LinkedCpItem,
};

use super::items::expect_item_kind;
use super::{DbPool, required_text};

impl DbPool {
    /// Link an FMEA item to each of the given CP items.
    ///
    /// Existing pairs are left untouched and returned as stored. Every id is
    /// checked before the first write; the writes share one transaction.
    /// An empty id list only checks the anchor and yields no associations.
    pub async fn create_associations(
        &self,
        fmea_item_id: i32,
        cp_item_ids: &[i32],
        created_by: &str,
    ) -> AppResult<Vec<Association>> {
        let created_by = required_text("created_by", created_by)?;

        let mut unique_ids = Vec::with_capacity(cp_item_ids.len());
        for id in cp_item_ids {
            if !unique_ids.contains(id) {
                unique_ids.push(*id);
            }
        }

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        expect_item_kind(&txn, fmea_item_id, ItemKind::Fmea).await?;
        if unique_ids.is_empty() {
            return Ok(Vec::new());
        }
        for cp_item_id in &unique_ids {
            expect_item_kind(&txn, *cp_item_id, ItemKind::Cp).await?;
        }

        let now = Utc::now();
        let mut inserted = 0u64;
        let mut associations = Vec::with_capacity(unique_ids.len());

        for cp_item_id in unique_ids {
            let model = ActiveModel {
                id: NotSet,
                fmea_item_id: Set(fmea_item_id),
                cp_item_id: Set(cp_item_id),
                created_by: Set(created_by.clone()),
                created_at: Set(now),
            };

            // A pair inserted concurrently or earlier is kept as is.
            inserted += AssociationEntity::insert(model)
                .on_conflict(
                    OnConflict::columns([
                        association::Column::FmeaItemId,
                        association::Column::CpItemId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to insert association: {}", e)))?;

            let stored = AssociationEntity::find()
                .filter(association::Column::FmeaItemId.eq(fmea_item_id))
                .filter(association::Column::CpItemId.eq(cp_item_id))
                .one(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to read association: {}", e)))?
                .ok_or_else(|| {
                    AppError::Database(format!(
                        "Association {} -> {} missing after insert",
                        fmea_item_id, cp_item_id
                    ))
                })?;
            associations.push(Association::from(stored));
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit associations: {}", e)))?;

        info!(
            fmea_item_id,
            created = inserted,
            requested = associations.len(),
            created_by = %created_by,
            "Recorded associations"
        );

        Ok(associations)
    }

    /// Associations of an FMEA item in creation order.
    pub async fn list_associations_for_fmea_item(
        &self,
        fmea_item_id: i32,
    ) -> AppResult<Vec<Association>> {
        expect_item_kind(self.connection(), fmea_item_id, ItemKind::Fmea).await?;

        let models = AssociationEntity::find()
            .filter(association::Column::FmeaItemId.eq(fmea_item_id))
            .order_by_asc(association::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list associations: {}", e)))?;

        Ok(models.into_iter().map(Association::from).collect())
    }

    /// The oldest confirmed pairs, used as examples when asking for suggestions.
    pub async fn example_associations(&self, limit: u64) -> AppResult<Vec<(FmeaItem, CpItem)>> {
        let links = AssociationEntity::find()
            .order_by_asc(association::Column::Id)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load example associations: {}", e)))?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let fmea_items: HashMap<i32, fmea_item::Model> = FmeaItemEntity::find()
            .filter(fmea_item::Column::Id.is_in(links.iter().map(|l| l.fmea_item_id)))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load FMEA items: {}", e)))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let cp_items: HashMap<i32, cp_item::Model> = CpItemEntity::find()
            .filter(cp_item::Column::Id.is_in(links.iter().map(|l| l.cp_item_id)))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load CP items: {}", e)))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(links
            .iter()
            .filter_map(|link| {
                let fmea = fmea_items.get(&link.fmea_item_id)?;
                let cp = cp_items.get(&link.cp_item_id)?;
                Some((
                    FmeaItem::from_entity(fmea.clone()),
                    CpItem::from_entity(cp.clone()),
                ))
            })
            .collect())
    }

    /// Every FMEA row of a document with the CP rows linked to it.
    pub async fn export_fmea_document(&self, document_id: i32) -> AppResult<FmeaExport> {
        let document = self.get_document(document_id).await?;
        if document.document_type != DocumentKind::Fmea {
            return Err(AppError::Validation(format!(
                "Export is only supported for FMEA documents; document {} is {}",
                document_id, document.document_type
            )));
        }

        let fmea_items = self.get_fmea_items_for_document(document_id).await?;

        let links = AssociationEntity::find()
            .filter(association::Column::FmeaItemId.is_in(fmea_items.iter().map(|i| i.id)))
            .order_by_asc(association::Column::Id)
            .find_also_related(CpItemEntity)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load linked CP items: {}", e)))?;

        let mut linked: HashMap<i32, Vec<LinkedCpItem>> = HashMap::new();
        for (link, cp) in links {
            if let Some(cp) = cp {
                linked
                    .entry(link.fmea_item_id)
                    .or_default()
                    .push(LinkedCpItem {
                        association_id: link.id,
                        created_by: link.created_by,
                        created_at: link.created_at,
                        cp_item: CpItem::from_entity(cp),
                    });
            }
        }

        let rows = fmea_items
            .into_iter()
            .map(|fmea_item| FmeaExportRow {
                linked_cp_items: linked.remove(&fmea_item.id).unwrap_or_default(),
                fmea_item,
            })
            .collect();

        Ok(FmeaExport {
            document,
            exported_at: Utc::now(),
            rows,
        })
    }
}
