//! Association entity linking one FMEA item to one CP item.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "associations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fmea_item_id: i32,
    pub cp_item_id: i32,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fmea_item::Entity",
        from = "Column::FmeaItemId",
        to = "super::fmea_item::Column::Id",
        on_delete = "Cascade"
    )]
    FmeaItem,
    #[sea_orm(
        belongs_to = "super::cp_item::Entity",
        from = "Column::CpItemId",
        to = "super::cp_item::Column::Id",
        on_delete = "Cascade"
    )]
    CpItem,
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

impl ActiveModelBehavior for ActiveModel {}
