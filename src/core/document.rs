//! Document lifecycle - Drafts, line item replacement, discounts, conversion.
//!
//! A document is an invoice, an estimate, or a charity record over the same
//! table, distinguished by `kind` plus the behavior flags snapshotted at
//! creation. All multi-step mutations run in one database transaction so
//! totals, balances, and the inventory flag always agree with the line items
//! actually stored.

use crate::{
    core::{
        calc::{self, LineAmounts, VatRate},
        inventory, payment,
    },
    entities::{Document, LineItem, Payment, document, line_item, payment as payment_entity},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// The three kinds of billing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A payable, revenue-eligible sale
    Invoice,
    /// A quote; payable only after conversion to an invoice
    Estimate,
    /// Free treatment; dispenses stock but never collects money
    Charity,
}

impl DocumentKind {
    /// The kind as stored in the `kind` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "INVOICE",
            Self::Estimate => "ESTIMATE",
            Self::Charity => "CHARITY",
        }
    }

    /// Title-case form used in printouts and audit reasons.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Estimate => "Estimate",
            Self::Charity => "Charity",
        }
    }

    /// Parses a stored kind string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INVOICE" => Some(Self::Invoice),
            "ESTIMATE" => Some(Self::Estimate),
            "CHARITY" => Some(Self::Charity),
            _ => None,
        }
    }

    /// Whether payments may be recorded against this kind.
    #[must_use]
    pub const fn payable(self) -> bool {
        matches!(self, Self::Invoice)
    }

    /// Whether this kind counts toward revenue reports.
    #[must_use]
    pub const fn revenue_eligible(self) -> bool {
        matches!(self, Self::Invoice)
    }

    /// Whether saving this kind removes dispensed items from stock.
    #[must_use]
    pub const fn dispenses_stock(self) -> bool {
        matches!(self, Self::Invoice | Self::Charity)
    }
}

/// Where a new draft comes from.
#[derive(Debug, Clone)]
pub enum DocumentOrigin {
    /// Billing for a calendar appointment; at most one document exists per
    /// `(appointment_id, kind)` pair
    Appointment {
        /// The appointment being billed
        appointment_id: i64,
        /// Patient on the appointment, if known
        patient_id: Option<i64>,
    },
    /// An over-the-counter sale with the owner details snapshotted inline
    WalkIn {
        /// Owner's name, required
        owner_name: String,
        /// Owner's phone number
        owner_contact: Option<String>,
        /// Owner's email address
        owner_email: Option<String>,
    },
}

/// One line as entered at the counter.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// Description shown on the document, also the stock item lookup key
    pub description: String,
    /// Units, strictly positive
    pub quantity: i32,
    /// VAT rate for the line
    pub vat_rate: VatRate,
    /// Per-line discount percentage
    pub discount_pct: f64,
    /// Which price field the receptionist typed
    pub entry: LineEntry,
}

/// The price entry mode for a line.
///
/// Receptionists normally type the tax-inclusive total the client pays
/// (`Gross`); price lists and imports supply the net unit price (`Net`).
#[derive(Debug, Clone, Copy)]
pub enum LineEntry {
    /// Tax-inclusive total for the whole line
    Gross {
        /// The amount the client pays for the line
        total_gross: f64,
    },
    /// Net price per unit before VAT and discount
    Net {
        /// Price of a single unit
        unit_net_price: f64,
    },
}

impl LineInput {
    fn amounts(&self) -> Result<LineAmounts> {
        match self.entry {
            LineEntry::Gross { total_gross } => {
                calc::reverse(self.quantity, total_gross, self.vat_rate, self.discount_pct)
            }
            LineEntry::Net { unit_net_price } => {
                calc::forward(self.quantity, unit_net_price, self.vat_rate, self.discount_pct)
            }
        }
    }
}

/// Creates a draft document, or returns the existing one for the same
/// appointment and kind.
///
/// The get-or-create keeps `(appointment_id, kind)` unique without surfacing
/// a conflict error: reopening an appointment's invoice is the normal flow,
/// not a failure. Walk-in drafts snapshot the owner details at creation and
/// require a non-empty owner name.
pub async fn create_draft(
    db: &DatabaseConnection,
    kind: DocumentKind,
    origin: DocumentOrigin,
) -> Result<document::Model> {
    let txn = db.begin().await?;

    let (appointment_id, patient_id, owner_name, owner_contact, owner_email) = match origin {
        DocumentOrigin::Appointment {
            appointment_id,
            patient_id,
        } => {
            if let Some(existing) = Document::find()
                .filter(document::Column::AppointmentId.eq(appointment_id))
                .filter(document::Column::Kind.eq(kind.as_str()))
                .one(&txn)
                .await?
            {
                txn.commit().await?;
                return Ok(existing);
            }
            (Some(appointment_id), patient_id, None, None, None)
        }
        DocumentOrigin::WalkIn {
            owner_name,
            owner_contact,
            owner_email,
        } => {
            let owner_name = owner_name.trim().to_string();
            if owner_name.is_empty() {
                return Err(Error::MissingOwnerName);
            }
            (None, None, Some(owner_name), owner_contact, owner_email)
        }
    };

    let status = if kind.payable() {
        payment::PaymentStatus::Unpaid
    } else {
        payment::PaymentStatus::NotApplicable
    };

    let created = document::ActiveModel {
        kind: Set(kind.as_str().to_string()),
        appointment_id: Set(appointment_id),
        patient_id: Set(patient_id),
        owner_name: Set(owner_name),
        owner_contact: Set(owner_contact),
        owner_email: Set(owner_email),
        discount_pct: Set(0),
        gross_subtotal: Set(0.0),
        final_amount: Set(0.0),
        remaining_balance: Set(0.0),
        payment_status: Set(status.as_str().to_string()),
        payment_method: Set(None),
        payable: Set(kind.payable()),
        revenue_eligible: Set(kind.revenue_eligible()),
        inventory_deducted: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(document_id = created.id, kind = kind.as_str(), "created draft");
    Ok(created)
}

/// Retrieves a document by id.
pub async fn get_document(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<Option<document::Model>> {
    Document::find_by_id(document_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All documents, newest first.
pub async fn list_documents(db: &DatabaseConnection) -> Result<Vec<document::Model>> {
    Document::find()
        .order_by_desc(document::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Line items of a document in entry order.
pub async fn line_items_for_document(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<Vec<line_item::Model>> {
    LineItem::find()
        .filter(line_item::Column::DocumentId.eq(document_id))
        .order_by_asc(line_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces a document's line items with a new set in one transaction.
///
/// Every input is validated and priced through the calculator before anything
/// is touched, then the old lines are deleted, the new ones inserted, the
/// document totals recomputed, the balance reconciled against existing
/// payments, and stock dispensed if this is the first save of an invoice or
/// charity record.
pub async fn replace_line_items(
    db: &DatabaseConnection,
    document_id: i64,
    inputs: Vec<LineInput>,
) -> Result<document::Model> {
    // price everything up front so a bad line leaves the document untouched
    let mut priced = Vec::with_capacity(inputs.len());
    for input in inputs {
        let amounts = input.amounts()?;
        priced.push((input, amounts));
    }

    let txn = db.begin().await?;

    let doc = Document::find_by_id(document_id)
        .one(&txn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    LineItem::delete_many()
        .filter(line_item::Column::DocumentId.eq(document_id))
        .exec(&txn)
        .await?;

    let mut gross_subtotal = 0.0;
    for (input, amounts) in priced {
        gross_subtotal += amounts.total_gross;
        line_item::ActiveModel {
            document_id: Set(document_id),
            description: Set(input.description),
            quantity: Set(input.quantity),
            unit_net_price: Set(amounts.unit_net_price),
            vat_rate_pct: Set(input.vat_rate.percent()),
            vat_amount: Set(amounts.vat_amount),
            discount_pct: Set(input.discount_pct),
            discount_amount: Set(amounts.discount_amount),
            total_gross: Set(amounts.total_gross),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    let gross_subtotal = calc::round2(gross_subtotal);
    let final_amount = calc::document_final_amount(gross_subtotal, doc.discount_pct)?;

    let mut active: document::ActiveModel = doc.into();
    active.gross_subtotal = Set(gross_subtotal);
    active.final_amount = Set(final_amount);
    active.update(&txn).await?;

    payment::reconcile(&txn, document_id).await?;

    let doc = refetch(&txn, document_id).await?;
    inventory::deduct_stock_once(&txn, &doc).await?;
    let doc = refetch(&txn, document_id).await?;

    txn.commit().await?;
    Ok(doc)
}

/// Sets the whole-document discount and recomputes the final amount.
pub async fn set_document_discount(
    db: &DatabaseConnection,
    document_id: i64,
    pct: i32,
) -> Result<document::Model> {
    let txn = db.begin().await?;

    let doc = Document::find_by_id(document_id)
        .one(&txn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    let final_amount = calc::document_final_amount(doc.gross_subtotal, pct)?;

    let mut active: document::ActiveModel = doc.into();
    active.discount_pct = Set(pct);
    active.final_amount = Set(final_amount);
    active.update(&txn).await?;

    payment::reconcile(&txn, document_id).await?;

    let doc = refetch(&txn, document_id).await?;
    txn.commit().await?;
    Ok(doc)
}

/// Converts an estimate into a payable invoice.
///
/// The one-way edge in the document state machine: the kind flips, the
/// payable and revenue flags turn on, the balance reconciles from existing
/// totals, and stock is dispensed unless a prior save already did it.
pub async fn convert_estimate_to_invoice(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<document::Model> {
    let txn = db.begin().await?;

    let doc = Document::find_by_id(document_id)
        .one(&txn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    if doc.kind != DocumentKind::Estimate.as_str() {
        return Err(Error::NotAnEstimate {
            id: document_id,
            kind: doc.kind,
        });
    }

    let mut active: document::ActiveModel = doc.into();
    active.kind = Set(DocumentKind::Invoice.as_str().to_string());
    active.payable = Set(true);
    active.revenue_eligible = Set(true);
    active.payment_status = Set(payment::PaymentStatus::Unpaid.as_str().to_string());
    active.update(&txn).await?;

    payment::reconcile(&txn, document_id).await?;

    let doc = refetch(&txn, document_id).await?;
    inventory::deduct_stock_once(&txn, &doc).await?;
    let doc = refetch(&txn, document_id).await?;

    txn.commit().await?;

    tracing::info!(document_id, "converted estimate to invoice");
    Ok(doc)
}

/// Deletes a document together with its line items and payments.
///
/// Stock movements are kept as audit history. Confirmation is a UI concern.
pub async fn delete_document(db: &DatabaseConnection, document_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let doc = Document::find_by_id(document_id)
        .one(&txn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    LineItem::delete_many()
        .filter(line_item::Column::DocumentId.eq(document_id))
        .exec(&txn)
        .await?;
    Payment::delete_many()
        .filter(payment_entity::Column::DocumentId.eq(document_id))
        .exec(&txn)
        .await?;
    Document::delete_by_id(doc.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(document_id, "deleted document");
    Ok(())
}

async fn refetch<C: ConnectionTrait>(conn: &C, document_id: i64) -> Result<document::Model> {
    Document::find_by_id(document_id)
        .one(conn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_draft_kind_flags() -> Result<()> {
        let db = setup_test_db().await?;

        let invoice = create_test_invoice(&db).await?;
        assert_eq!(invoice.kind, "INVOICE");
        assert!(invoice.payable);
        assert!(invoice.revenue_eligible);
        assert_eq!(invoice.payment_status, "Unpaid");

        let estimate = create_test_estimate(&db).await?;
        assert!(!estimate.payable);
        assert!(!estimate.revenue_eligible);
        assert_eq!(estimate.payment_status, "N/A");

        let charity = create_test_charity(&db).await?;
        assert!(!charity.payable);
        assert!(!charity.revenue_eligible);
        assert_eq!(charity.payment_status, "N/A");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_draft_appointment_get_or_create() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_draft(
            &db,
            DocumentKind::Invoice,
            DocumentOrigin::Appointment {
                appointment_id: 42,
                patient_id: Some(7),
            },
        )
        .await?;

        let second = create_draft(
            &db,
            DocumentKind::Invoice,
            DocumentOrigin::Appointment {
                appointment_id: 42,
                patient_id: Some(7),
            },
        )
        .await?;
        assert_eq!(first.id, second.id);

        // a different kind for the same appointment is a new document
        let estimate = create_draft(
            &db,
            DocumentKind::Estimate,
            DocumentOrigin::Appointment {
                appointment_id: 42,
                patient_id: Some(7),
            },
        )
        .await?;
        assert_ne!(first.id, estimate.id);

        assert_eq!(list_documents(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_walk_in_requires_owner_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_draft(
            &db,
            DocumentKind::Invoice,
            DocumentOrigin::WalkIn {
                owner_name: "   ".to_string(),
                owner_contact: None,
                owner_email: None,
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::MissingOwnerName));

        let doc = create_draft(
            &db,
            DocumentKind::Invoice,
            DocumentOrigin::WalkIn {
                owner_name: " Maria Ioannou ".to_string(),
                owner_contact: Some("99123456".to_string()),
                owner_email: None,
            },
        )
        .await?;
        assert_eq!(doc.owner_name, Some("Maria Ioannou".to_string()));
        assert_eq!(doc.appointment_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_line_items_totals() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db).await?;

        let doc = replace_line_items(
            &db,
            invoice.id,
            vec![
                LineInput {
                    description: "Consultation".to_string(),
                    quantity: 1,
                    vat_rate: VatRate::Standard,
                    discount_pct: 0.0,
                    entry: LineEntry::Gross { total_gross: 23.80 },
                },
                LineInput {
                    description: "Vaccination".to_string(),
                    quantity: 1,
                    vat_rate: VatRate::Reduced,
                    discount_pct: 0.0,
                    entry: LineEntry::Gross { total_gross: 21.00 },
                },
            ],
        )
        .await?;

        assert_eq!(doc.gross_subtotal, 44.80);
        assert_eq!(doc.final_amount, 44.80);
        assert_eq!(doc.remaining_balance, 44.80);

        let lines = line_items_for_document(&db, invoice.id).await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].unit_net_price, 20.0);
        assert_eq!(lines[0].vat_amount, 3.80);
        assert_eq!(lines[1].vat_amount, 1.00);

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_line_items_is_full_replace() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db).await?;

        replace_line_items(
            &db,
            invoice.id,
            vec![gross_line("Consultation", 1, VatRate::Standard, 23.80)],
        )
        .await?;
        let doc = replace_line_items(
            &db,
            invoice.id,
            vec![gross_line("Surgery", 1, VatRate::Standard, 119.00)],
        )
        .await?;

        let lines = line_items_for_document(&db, invoice.id).await?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description, "Surgery");
        assert_eq!(doc.gross_subtotal, 119.00);

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_line_items_bad_input_leaves_document_untouched() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db).await?;
        replace_line_items(
            &db,
            invoice.id,
            vec![gross_line("Consultation", 1, VatRate::Standard, 23.80)],
        )
        .await?;

        let result = replace_line_items(
            &db,
            invoice.id,
            vec![gross_line("Broken", 0, VatRate::Standard, 10.00)],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidQuantity { .. }));

        let lines = line_items_for_document(&db, invoice.id).await?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description, "Consultation");

        Ok(())
    }

    #[tokio::test]
    async fn test_net_entry_mode() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db).await?;

        let doc = replace_line_items(
            &db,
            invoice.id,
            vec![LineInput {
                description: "Dental cleaning".to_string(),
                quantity: 2,
                vat_rate: VatRate::Standard,
                discount_pct: 0.0,
                entry: LineEntry::Net { unit_net_price: 10.0 },
            }],
        )
        .await?;

        assert_eq!(doc.gross_subtotal, 23.80);

        Ok(())
    }

    #[tokio::test]
    async fn test_document_discount_recomputes_and_reconciles() -> Result<()> {
        let (db, invoice) = setup_with_invoice(200.0).await?;

        let doc = set_document_discount(&db, invoice.id, 25).await?;
        assert_eq!(doc.discount_pct, 25);
        assert_eq!(doc.gross_subtotal, 200.0);
        assert_eq!(doc.final_amount, 150.0);
        assert_eq!(doc.remaining_balance, 150.0);

        assert!(matches!(
            set_document_discount(&db, invoice.id, 101).await,
            Err(Error::InvalidDiscount { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_discount_after_payment_shifts_status() -> Result<()> {
        let (db, invoice) = setup_with_invoice(100.0).await?;
        crate::core::payment::add_payment(
            &db,
            invoice.id,
            50.0,
            "Cash".to_string(),
            Utc::now(),
            None,
        )
        .await?;

        // halving the bill makes the earlier payment settle it in full
        let doc = set_document_discount(&db, invoice.id, 50).await?;
        assert_eq!(doc.final_amount, 50.0);
        assert_eq!(doc.remaining_balance, 0.0);
        assert_eq!(doc.payment_status, "Paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_line_replace_reconciles_existing_payments() -> Result<()> {
        let (db, invoice) = setup_with_invoice(50.0).await?;
        crate::core::payment::add_payment(
            &db,
            invoice.id,
            50.0,
            "Cash".to_string(),
            Utc::now(),
            None,
        )
        .await?;
        assert_eq!(fetch_document(&db, invoice.id).await?.payment_status, "Paid");

        // growing the bill reopens the balance under the old payment
        let doc = replace_line_items(
            &db,
            invoice.id,
            vec![gross_line("Consultation", 1, VatRate::Zero, 80.0)],
        )
        .await?;
        assert_eq!(doc.final_amount, 80.0);
        assert_eq!(doc.remaining_balance, 30.0);
        assert_eq!(doc.payment_status, "Partially Paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_overpayment_clamped_to_zero() -> Result<()> {
        let (db, invoice) = setup_with_invoice(100.0).await?;
        crate::core::payment::add_payment(
            &db,
            invoice.id,
            80.0,
            "Cash".to_string(),
            Utc::now(),
            None,
        )
        .await?;

        // discount shrinks the bill below what was already paid
        let doc = set_document_discount(&db, invoice.id, 50).await?;
        assert_eq!(doc.final_amount, 50.0);
        assert_eq!(doc.remaining_balance, 0.0);
        assert_eq!(doc.payment_status, "Paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_convert_estimate_to_invoice() -> Result<()> {
        let db = setup_test_db().await?;
        let estimate = create_test_estimate(&db).await?;
        replace_line_items(
            &db,
            estimate.id,
            vec![gross_line("Surgery", 1, VatRate::Standard, 119.00)],
        )
        .await?;

        let doc = convert_estimate_to_invoice(&db, estimate.id).await?;
        assert_eq!(doc.kind, "INVOICE");
        assert!(doc.payable);
        assert!(doc.revenue_eligible);
        assert_eq!(doc.payment_status, "Unpaid");
        assert_eq!(doc.remaining_balance, 119.00);

        // the edge is one-way
        let result = convert_estimate_to_invoice(&db, estimate.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotAnEstimate { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_convert_deducts_stock_exactly_once() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_stock_item(&db, "Frontline Spray", 10).await?;

        let estimate = create_test_estimate(&db).await?;
        replace_line_items(
            &db,
            estimate.id,
            vec![gross_line("Frontline Spray", 4, VatRate::Standard, 47.60)],
        )
        .await?;
        // estimates never dispense
        assert!(
            crate::core::inventory::movements_for_document(&db, estimate.id)
                .await?
                .is_empty()
        );

        convert_estimate_to_invoice(&db, estimate.id).await?;
        let movements =
            crate::core::inventory::movements_for_document(&db, estimate.id).await?;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].change_qty, -4);

        // saving again after conversion must not dispense twice
        replace_line_items(
            &db,
            estimate.id,
            vec![gross_line("Frontline Spray", 4, VatRate::Standard, 47.60)],
        )
        .await?;
        assert_eq!(
            crate::core::inventory::movements_for_document(&db, estimate.id)
                .await?
                .len(),
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_convert_non_estimate_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db).await?;

        let result = convert_estimate_to_invoice(&db, invoice.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotAnEstimate { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_document_cascades() -> Result<()> {
        let (db, invoice) = setup_with_invoice(100.0).await?;
        crate::core::payment::add_payment(
            &db,
            invoice.id,
            40.0,
            "Cash".to_string(),
            Utc::now(),
            None,
        )
        .await?;

        delete_document(&db, invoice.id).await?;

        assert!(get_document(&db, invoice.id).await?.is_none());
        assert!(line_items_for_document(&db, invoice.id).await?.is_empty());
        assert!(
            crate::core::payment::payments_for_document(&db, invoice.id)
                .await?
                .is_empty()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_document_not_found_paths() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(matches!(
            replace_line_items(&db, 999, vec![]).await.unwrap_err(),
            Error::DocumentNotFound { id: 999 }
        ));
        assert!(matches!(
            set_document_discount(&db, 999, 10).await.unwrap_err(),
            Error::DocumentNotFound { id: 999 }
        ));
        assert!(matches!(
            delete_document(&db, 999).await.unwrap_err(),
            Error::DocumentNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_document_not_found_mock() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<document::Model>::new()])
            .into_connection();

        assert!(get_document(&db, 999).await?.is_none());

        Ok(())
    }
}
