//! FmeaItem entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fmea_items")]
pub struct Model {
    /// Same value as the owning `items` row.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub document_id: i32,
    pub row_index: i32,
    pub process_step: Option<String>,
    pub process_function: Option<String>,
    pub process_item: Option<String>,
    pub process_item_function: Option<String>,
    pub work_element: Option<String>,
    pub work_element_function: Option<String>,
    pub failure_effects: Option<String>,
    pub failure_mode: Option<String>,
    pub failure_cause: Option<String>,
    pub severity: Option<i16>,
    pub occurrence: Option<i16>,
    pub detection: Option<i16>,
    /// H, M or L
    pub action_priority: Option<String>,
    pub prevention_controls: Option<String>,
    pub detection_controls: Option<String>,
    pub prevention_action: Option<String>,
    pub detection_action: Option<String>,
    pub responsible_person: Option<String>,
    pub target_completion_date: Option<Date>,
    pub status: Option<String>,
    pub action_taken: Option<String>,
    pub completion_date: Option<Date>,
    pub post_severity: Option<i16>,
    pub post_occurrence: Option<i16>,
    pub post_detection: Option<i16>,
    pub post_action_priority: Option<String>,
    pub remarks: Option<String>,
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
