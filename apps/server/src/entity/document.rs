//! Document entity for uploaded FMEA / CP / OI files.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub file_name: String,
    /// FMEA, CP or OI. Never updated after insert.
    pub document_kind: String,
    pub version: String,
    pub uploaded_by: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
    #[sea_orm(has_many = "super::fmea_item::Entity")]
    FmeaItems,
    #[sea_orm(has_many = "super::cp_item::Entity")]
    CpItems,
    #[sea_orm(has_many = "super::fmea_fe_item::Entity")]
    FailureEffects,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::fmea_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FmeaItems.def()
    }
}

impl Related<super::cp_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CpItems.def()
    }
}

impl Related<super::fmea_fe_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FailureEffects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
