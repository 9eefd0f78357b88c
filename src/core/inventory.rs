//! Exactly-once stock dispensing for saved documents.
//!
//! Invoices and charity records remove dispensed quantities from stock on
//! their first save (or on estimate conversion). The guard is two-level: the
//! document's `inventory_deducted` flag short-circuits whole documents, and a
//! movement keyed on `(document_id, line_item_id)` guards individual lines,
//! so a partially recorded deduction is never repeated for the lines that
//! already went through.

use crate::{
    core::document::DocumentKind,
    entities::{LineItem, StockItem, StockMovement, document, line_item, stock_item, stock_movement},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// Dispenses a document's line items from stock, at most once per document.
///
/// Generic over `ConnectionTrait` so it joins the caller's save or convert
/// transaction. Lines whose description matches no stock item by name are
/// service lines (consultations, procedures) and are skipped silently.
pub(crate) async fn deduct_stock_once<C: ConnectionTrait>(
    conn: &C,
    doc: &document::Model,
) -> Result<()> {
    let Some(kind) = DocumentKind::parse(&doc.kind) else {
        return Ok(());
    };
    if !kind.dispenses_stock() || doc.inventory_deducted {
        return Ok(());
    }

    let lines = LineItem::find()
        .filter(line_item::Column::DocumentId.eq(doc.id))
        .all(conn)
        .await?;

    for line in lines {
        if line.quantity <= 0 {
            continue;
        }

        let Some(item) = StockItem::find()
            .filter(stock_item::Column::Name.eq(line.description.trim()))
            .one(conn)
            .await?
        else {
            continue;
        };

        let already_dispensed = StockMovement::find()
            .filter(stock_movement::Column::DocumentId.eq(doc.id))
            .filter(stock_movement::Column::LineItemId.eq(line.id))
            .one(conn)
            .await?
            .is_some();
        if already_dispensed {
            continue;
        }

        let reason = format!(
            "Dispensed via {} #{} — {}×{}",
            kind.title(),
            doc.id,
            line.quantity,
            line.description
        );
        stock_movement::ActiveModel {
            item_id: Set(item.id),
            document_id: Set(Some(doc.id)),
            line_item_id: Set(Some(line.id)),
            change_qty: Set(-line.quantity),
            reason: Set(reason),
            timestamp: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        let remaining = item.quantity - line.quantity;
        tracing::info!(
            document_id = doc.id,
            item = %line.description,
            quantity = line.quantity,
            remaining,
            "dispensed stock"
        );
        let mut active: stock_item::ActiveModel = item.into();
        active.quantity = Set(remaining);
        active.update(conn).await?;
    }

    let mut active: document::ActiveModel = doc.clone().into();
    active.inventory_deducted = Set(true);
    active.update(conn).await?;

    Ok(())
}

/// Looks up a stock item by its exact name.
pub async fn stock_item_by_name(
    db: &sea_orm::DatabaseConnection,
    name: &str,
) -> Result<Option<stock_item::Model>> {
    StockItem::find()
        .filter(stock_item::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All stock movements a document caused, oldest first.
pub async fn movements_for_document(
    db: &sea_orm::DatabaseConnection,
    document_id: i64,
) -> Result<Vec<stock_movement::Model>> {
    StockMovement::find()
        .filter(stock_movement::Column::DocumentId.eq(document_id))
        .order_by_asc(stock_movement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
