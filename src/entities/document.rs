//! Document entity - Represents a billing document (invoice, estimate, or charity record).
//!
//! A document carries its own denormalized totals (`gross_subtotal`, `final_amount`,
//! `remaining_balance`) so that printed copies and reports never drift from what
//! was shown at the counter. Behavior flags (`payable`, `revenue_eligible`,
//! `inventory_deducted`) are stored per row rather than derived from `kind` at
//! read time.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Unique identifier for the document
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Document kind: `"INVOICE"`, `"ESTIMATE"`, or `"CHARITY"`
    pub kind: String,
    /// Originating appointment, if the document came from the calendar
    pub appointment_id: Option<i64>,
    /// Patient the document bills for, absent for walk-in sales
    pub patient_id: Option<i64>,
    /// Snapshot of the owner's name taken at creation time
    pub owner_name: Option<String>,
    /// Snapshot of the owner's phone number
    pub owner_contact: Option<String>,
    /// Snapshot of the owner's email address
    pub owner_email: Option<String>,
    /// Whole-document discount percentage, 0 to 100
    pub discount_pct: i32,
    /// Sum of line item gross totals before the document discount
    pub gross_subtotal: f64,
    /// Amount owed after applying the document discount
    pub final_amount: f64,
    /// Final amount minus recorded payments, clamped at zero
    pub remaining_balance: f64,
    /// Payment status: `"Paid"`, `"Partially Paid"`, `"Unpaid"`, or `"N/A"`
    pub payment_status: String,
    /// Method of the most recent payment, if any
    pub payment_method: Option<String>,
    /// Whether payments may be recorded against this document
    pub payable: bool,
    /// Whether this document counts toward revenue reports
    pub revenue_eligible: bool,
    /// Whether stock has already been deducted for this document
    pub inventory_deducted: bool,
    /// When the document was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Document and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One document has many line items
    #[sea_orm(has_many = "super::line_item::Entity")]
    LineItem,
    /// One document has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItem.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
