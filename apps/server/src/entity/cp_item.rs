//! CpItem entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cp_items")]
pub struct Model {
    /// Same value as the owning `items` row.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub document_id: i32,
    pub row_index: i32,
    pub process_name: Option<String>,
    pub product_characteristic: Option<String>,
    pub process_characteristic: Option<String>,
    pub evaluation_technique: Option<String>,
    pub control_method: Option<String>,
    pub spec_tolerance: Option<String>,
    pub sample_size: Option<String>,
    pub sample_frequency: Option<String>,
    pub special_characteristic_class: Option<String>,
    pub equipment: Option<String>,
    pub reaction_plan: Option<String>,
    pub edited_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::Id",
        to = "super::item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::Id",
        on_delete = "Cascade"
    )]
    Document,
    #[sea_orm(has_many = "super::association::Entity")]
    Associations,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::association::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Associations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
