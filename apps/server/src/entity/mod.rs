//! SeaORM entity definitions.

pub mod association;
pub mod cp_item;
pub mod document;
pub mod fmea_fe_item;
pub mod fmea_item;
pub mod item;
pub mod item_history;
