//! Print payload assembly.
//!
//! Hands the UI layer everything a printed or emailed copy needs as one flat
//! structure. Formatting, PDF layout, and delivery live outside the core.
//! Unlike the Z-report, the per-rate breakdown here sums the stored line
//! amounts as-is; the document discount shows as a single subtraction line
//! between subtotal and final total.

use crate::{
    core::{calc, document::DocumentKind, payment},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Clinic identity printed in the document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicHeader {
    /// Clinic name
    pub name: String,
    /// Street address
    pub address: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
}

/// One printed line row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLine {
    /// Description as entered
    pub description: String,
    /// Units
    pub quantity: i32,
    /// Net unit price
    pub unit_net_price: f64,
    /// Per-line discount amount
    pub discount_amount: f64,
    /// VAT rate percentage
    pub vat_rate_pct: i32,
    /// VAT charged on the line
    pub vat_amount: f64,
    /// Fiscal letter for the rate
    pub fiscal_flag: String,
    /// Gross total for the line
    pub total_gross: f64,
}

/// One row of the printed VAT breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatBreakdownRow {
    /// VAT rate percentage
    pub vat_rate_pct: i32,
    /// Fiscal letter for the rate
    pub fiscal_flag: String,
    /// Net amount at this rate
    pub net: f64,
    /// VAT amount at this rate
    pub vat_amount: f64,
}

/// Everything the UI needs to render a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    /// Clinic identity for the header
    pub clinic: ClinicHeader,
    /// Document id, the printed document number
    pub document_id: i64,
    /// Title-case kind, e.g. `"Invoice"`
    pub kind_title: String,
    /// When the document was created
    pub created_at: DateTime<Utc>,
    /// Owner name snapshot, if any
    pub owner_name: Option<String>,
    /// Owner phone snapshot
    pub owner_contact: Option<String>,
    /// Owner email snapshot
    pub owner_email: Option<String>,
    /// Patient reference, if any
    pub patient_id: Option<i64>,
    /// Appointment reference, if any
    pub appointment_id: Option<i64>,
    /// Line rows in entry order
    pub lines: Vec<RenderLine>,
    /// Per-rate VAT table, ascending by rate
    pub vat_breakdown: Vec<VatBreakdownRow>,
    /// Total VAT across all rates
    pub vat_total: f64,
    /// Sum of line gross totals
    pub gross_subtotal: f64,
    /// Whole-document discount percentage
    pub discount_pct: i32,
    /// Amount removed by the document discount
    pub discount_amount: f64,
    /// Amount owed after the document discount
    pub final_amount: f64,
    /// Sum of recorded payments
    pub paid_to_date: f64,
    /// Open balance
    pub balance_due: f64,
    /// Payment status string
    pub payment_status: String,
}

/// Assembles the render payload for a document.
pub async fn render_payload(
    db: &DatabaseConnection,
    clinic: ClinicHeader,
    document_id: i64,
) -> Result<RenderPayload> {
    let doc = crate::core::document::get_document(db, document_id)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    let kind_title = DocumentKind::parse(&doc.kind)
        .map_or_else(|| doc.kind.clone(), |k| k.title().to_string());

    let line_models = crate::core::document::line_items_for_document(db, document_id).await?;

    let mut breakdown: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    let mut lines = Vec::with_capacity(line_models.len());
    for line in line_models {
        let entry = breakdown.entry(line.vat_rate_pct).or_insert((0.0, 0.0));
        entry.0 += line.total_gross - line.vat_amount;
        entry.1 += line.vat_amount;
        lines.push(RenderLine {
            description: line.description,
            quantity: line.quantity,
            unit_net_price: line.unit_net_price,
            discount_amount: line.discount_amount,
            vat_rate_pct: line.vat_rate_pct,
            vat_amount: line.vat_amount,
            fiscal_flag: calc::VatRate::from_percent(line.vat_rate_pct)
                .map_or(String::new(), |r| r.fiscal_flag().to_string()),
            total_gross: line.total_gross,
        });
    }
    let vat_breakdown: Vec<VatBreakdownRow> = breakdown
        .into_iter()
        .map(|(pct, (net, vat))| VatBreakdownRow {
            vat_rate_pct: pct,
            fiscal_flag: calc::VatRate::from_percent(pct)
                .map_or(String::new(), |r| r.fiscal_flag().to_string()),
            net: calc::round2(net),
            vat_amount: calc::round2(vat),
        })
        .collect();
    let vat_total = calc::round2(vat_breakdown.iter().map(|r| r.vat_amount).sum());

    let paid_to_date = calc::round2(
        payment::payments_for_document(db, document_id)
            .await?
            .iter()
            .map(|p| p.amount)
            .sum(),
    );

    Ok(RenderPayload {
        clinic,
        document_id: doc.id,
        kind_title,
        created_at: doc.created_at,
        owner_name: doc.owner_name,
        owner_contact: doc.owner_contact,
        owner_email: doc.owner_email,
        patient_id: doc.patient_id,
        appointment_id: doc.appointment_id,
        lines,
        vat_breakdown,
        vat_total,
        gross_subtotal: doc.gross_subtotal,
        discount_pct: doc.discount_pct,
        discount_amount: calc::round2(doc.gross_subtotal - doc.final_amount),
        final_amount: doc.final_amount,
        paid_to_date,
        balance_due: doc.remaining_balance,
        payment_status: doc.payment_status,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::calc::VatRate;
    use crate::core::document::{replace_line_items, set_document_discount};
    use crate::test_utils::*;

    fn test_clinic() -> ClinicHeader {
        ClinicHeader {
            name: "Harbor Vet Clinic".to_string(),
            address: "12 Seafront Road".to_string(),
            phone: "25 123456".to_string(),
            email: "office@harborvet.example".to_string(),
        }
    }

    #[tokio::test]
    async fn test_payload_totals_agree_with_document() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db).await?;
        replace_line_items(
            &db,
            invoice.id,
            vec![
                gross_line("Consultation", 1, VatRate::Standard, 23.80),
                gross_line("Vaccination", 1, VatRate::Reduced, 21.00),
            ],
        )
        .await?;
        set_document_discount(&db, invoice.id, 10).await?;
        crate::core::payment::add_payment(
            &db,
            invoice.id,
            20.0,
            "Cash".to_string(),
            chrono::Utc::now(),
            None,
        )
        .await?;

        let payload = render_payload(&db, test_clinic(), invoice.id).await?;

        assert_eq!(payload.kind_title, "Invoice");
        assert_eq!(payload.lines.len(), 2);
        assert_eq!(payload.gross_subtotal, 44.80);
        assert_eq!(payload.discount_pct, 10);
        assert_eq!(payload.discount_amount, 4.48);
        assert_eq!(payload.final_amount, 40.32);
        assert_eq!(payload.paid_to_date, 20.0);
        assert_eq!(payload.balance_due, 20.32);
        assert_eq!(payload.payment_status, "Partially Paid");

        // breakdown is over raw line amounts, not discount-scaled
        assert_eq!(payload.vat_breakdown.len(), 2);
        assert_eq!(payload.vat_breakdown[0].vat_rate_pct, 5);
        assert_eq!(payload.vat_breakdown[0].net, 20.00);
        assert_eq!(payload.vat_breakdown[0].vat_amount, 1.00);
        assert_eq!(payload.vat_breakdown[1].fiscal_flag, "C");
        assert_eq!(payload.vat_breakdown[1].vat_amount, 3.80);
        assert_eq!(payload.vat_total, 4.80);

        assert_eq!(payload.clinic.name, "Harbor Vet Clinic");

        Ok(())
    }

    #[tokio::test]
    async fn test_payload_walk_in_header() -> Result<()> {
        let db = setup_test_db().await?;
        let doc = crate::core::document::create_draft(
            &db,
            crate::core::document::DocumentKind::Estimate,
            crate::core::document::DocumentOrigin::WalkIn {
                owner_name: "Maria Ioannou".to_string(),
                owner_contact: Some("99123456".to_string()),
                owner_email: None,
            },
        )
        .await?;

        let payload = render_payload(&db, test_clinic(), doc.id).await?;
        assert_eq!(payload.kind_title, "Estimate");
        assert_eq!(payload.owner_name, Some("Maria Ioannou".to_string()));
        assert_eq!(payload.appointment_id, None);
        assert_eq!(payload.payment_status, "N/A");
        assert!(payload.lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_payload_document_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = render_payload(&db, test_clinic(), 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DocumentNotFound { id: 999 }
        ));
        Ok(())
    }
}
