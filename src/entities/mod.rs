//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod document;
pub mod line_item;
pub mod payment;
pub mod stock_item;
pub mod stock_movement;

// Re-export specific types to avoid conflicts
pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
pub use line_item::{Column as LineItemColumn, Entity as LineItem, Model as LineItemModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use stock_item::{Column as StockItemColumn, Entity as StockItem, Model as StockItemModel};
pub use stock_movement::{
    Column as StockMovementColumn, Entity as StockMovement, Model as StockMovementModel,
};
