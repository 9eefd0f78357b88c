//! Stock item entity - A sellable product tracked in inventory.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_items")]
pub struct Model {
    /// Unique identifier for the stock item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product name, matched against line item descriptions when dispensing
    pub name: String,
    /// Longer description of the product
    pub description: Option<String>,
    /// What the clinic paid per unit
    pub unit_cost: f64,
    /// What the clinic charges per unit
    pub unit_price: f64,
    /// Current units on hand
    pub quantity: i32,
    /// Reorder alert threshold
    pub reorder_threshold: i32,
}

/// Defines relationships between `StockItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One stock item has many movements
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovement,
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
