//! Shared test utilities for the billing core.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test documents with sensible defaults.

use crate::{
    core::{
        calc::VatRate,
        document::{self, DocumentKind, DocumentOrigin, LineEntry, LineInput},
    },
    entities,
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a walk-in invoice draft with a default owner.
pub async fn create_test_invoice(db: &DatabaseConnection) -> Result<entities::DocumentModel> {
    create_test_draft(db, DocumentKind::Invoice).await
}

/// Creates a walk-in estimate draft with a default owner.
pub async fn create_test_estimate(db: &DatabaseConnection) -> Result<entities::DocumentModel> {
    create_test_draft(db, DocumentKind::Estimate).await
}

/// Creates a walk-in charity draft with a default owner.
pub async fn create_test_charity(db: &DatabaseConnection) -> Result<entities::DocumentModel> {
    create_test_draft(db, DocumentKind::Charity).await
}

async fn create_test_draft(
    db: &DatabaseConnection,
    kind: DocumentKind,
) -> Result<entities::DocumentModel> {
    document::create_draft(
        db,
        kind,
        DocumentOrigin::WalkIn {
            owner_name: "Test Owner".to_string(),
            owner_contact: None,
            owner_email: None,
        },
    )
    .await
}

/// A gross-entry line input, the way lines are normally typed in.
#[must_use]
pub fn gross_line(description: &str, quantity: i32, vat_rate: VatRate, total: f64) -> LineInput {
    LineInput {
        description: description.to_string(),
        quantity,
        vat_rate,
        discount_pct: 0.0,
        entry: LineEntry::Gross { total_gross: total },
    }
}

/// Re-reads a document tests just created.
pub async fn fetch_document(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<entities::DocumentModel> {
    document::get_document(db, document_id)
        .await?
        .ok_or(crate::errors::Error::DocumentNotFound { id: document_id })
}

/// Sets up a database with one invoice carrying a single zero-VAT line of the
/// given total, so `final_amount == remaining_balance == total`.
/// Returns (db, invoice) for payment and reconciliation tests.
pub async fn setup_with_invoice(total: f64) -> Result<(DatabaseConnection, entities::DocumentModel)> {
    let db = setup_test_db().await?;
    let invoice = create_test_invoice(&db).await?;
    let invoice = document::replace_line_items(
        &db,
        invoice.id,
        vec![gross_line("Consultation", 1, VatRate::Zero, total)],
    )
    .await?;
    Ok((db, invoice))
}

/// Creates a stock item with the given starting quantity.
pub async fn create_test_stock_item(
    db: &DatabaseConnection,
    name: &str,
    quantity: i32,
) -> Result<entities::StockItemModel> {
    entities::stock_item::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        unit_cost: Set(5.0),
        unit_price: Set(10.0),
        quantity: Set(quantity),
        reorder_threshold: Set(2),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
