//! Line item entity - One billed position on a document.
//!
//! Monetary columns are stored fully derived: `unit_net_price` at four decimals,
//! the rest at two. `total_gross` is the authoritative charged amount for the
//! line, the net and VAT columns exist for fiscal reporting.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "line_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the document this line belongs to
    pub document_id: i64,
    /// Description as shown on the printed document
    pub description: String,
    /// Number of units, strictly positive
    pub quantity: i32,
    /// Net price of a single unit, rounded to four decimals
    pub unit_net_price: f64,
    /// VAT rate percentage: 0, 5, or 19
    pub vat_rate_pct: i32,
    /// VAT portion of the gross total
    pub vat_amount: f64,
    /// Per-line discount percentage, 0 to 100 exclusive of 100
    pub discount_pct: f64,
    /// Net amount removed by the per-line discount
    pub discount_amount: f64,
    /// Gross amount charged for the line
    pub total_gross: f64,
}

/// Defines relationships between `LineItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one document
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::Id"
    )]
    Document,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
