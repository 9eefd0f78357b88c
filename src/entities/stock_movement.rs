//! Stock movement entity - An audit record of every inventory change.
//!
//! Movements produced by billing carry the originating `document_id` and
//! `line_item_id`, which is what makes dispensing idempotent.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock movement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the stock item that changed
    pub item_id: i64,
    /// Document that caused the movement, absent for manual adjustments
    pub document_id: Option<i64>,
    /// Line item that caused the movement, absent for manual adjustments
    pub line_item_id: Option<i64>,
    /// Signed quantity change (negative for dispensing)
    pub change_qty: i32,
    /// Human-readable reason for the change
    pub reason: String,
    /// When the movement was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between `StockMovement` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement belongs to one stock item
    #[sea_orm(
        belongs_to = "super::stock_item::Entity",
        from = "Column::ItemId",
        to = "super::stock_item::Column::Id"
    )]
    StockItem,
}

impl Related<super::stock_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
