//! Item id-space entity shared by FMEA and CP items.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub document_id: i32,
    /// FMEA or CP; always equal to the owning document's kind.
    pub item_kind: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::Id",
        on_delete = "Cascade"
    )]
    Document,
    #[sea_orm(has_one = "super::fmea_item::Entity")]
    FmeaItem,
    #[sea_orm(has_one = "super::cp_item::Entity")]
    CpItem,
    #[sea_orm(has_many = "super::item_history::Entity")]
    History,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::fmea_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FmeaItem.def()
    }
}

impl Related<super::cp_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CpItem.def()
    }
}

impl Related<super::item_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
