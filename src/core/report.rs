//! Business-day revenue aggregation, the end-of-day Z-report.
//!
//! A business day is a half-open window starting at the configured cutoff
//! hour, so late-night entries land on the day the shift belongs to rather
//! than the calendar date. The same window filters both sales (by document
//! `created_at`) and tenders (by payment `paid_at`). The report is a derived
//! snapshot and never writes anything back.

use crate::{
    core::{calc, document::DocumentKind},
    entities::{Document, LineItem, Payment, document, line_item, payment},
    errors::{Error, Result},
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net, VAT, and gross for one VAT rate across the window's invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBucket {
    /// The VAT rate this row aggregates
    pub vat_rate_pct: i32,
    /// Fiscal letter for the rate
    pub fiscal_flag: String,
    /// Net revenue excluding VAT
    pub net_excl_vat: f64,
    /// VAT collected at this rate
    pub vat_amount: f64,
    /// Gross revenue including VAT
    pub gross_incl_vat: f64,
}

/// Money taken per tender method within the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderTotals {
    /// Payment method, `"Other"` when the payment carried none
    pub method: String,
    /// Sum of non-negative payment amounts
    pub payments_total: f64,
    /// Absolute sum of negative payment amounts
    pub refunds_total: f64,
}

/// The end-of-day report for one business date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZReport {
    /// The business date the report covers
    pub business_date: NaiveDate,
    /// Inclusive start of the window
    pub window_start: DateTime<Utc>,
    /// Exclusive end of the window
    pub window_end: DateTime<Utc>,
    /// Number of revenue-eligible invoices in the window
    pub invoice_count: usize,
    /// Sum of invoice final amounts, after document discounts
    pub gross_sales: f64,
    /// Per-rate breakdown, ascending by rate
    pub rate_buckets: Vec<RateBucket>,
    /// Grand total net across all rates
    pub total_net: f64,
    /// Grand total VAT across all rates
    pub total_vat: f64,
    /// Grand total gross across all rates
    pub total_gross: f64,
    /// Per-method tender totals, ascending by method name
    pub tenders: Vec<TenderTotals>,
    /// All positive tender movements
    pub payments_total: f64,
    /// All refund movements, as a positive number
    pub refunds_total: f64,
    /// Payments minus refunds
    pub net_received: f64,
}

/// The half-open window `[date cutoff:00, date+1 cutoff:00)` for a business
/// date.
pub fn business_window(
    business_date: NaiveDate,
    cutoff_hour: u32,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = business_date
        .and_hms_opt(cutoff_hour, 0, 0)
        .ok_or_else(|| Error::Config {
            message: format!("invalid report cutoff hour: {cutoff_hour}"),
        })?
        .and_utc();
    let next_day = business_date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| Error::Config {
            message: format!("business date out of range: {business_date}"),
        })?;
    let end = next_day
        .and_hms_opt(cutoff_hour, 0, 0)
        .ok_or_else(|| Error::Config {
            message: format!("invalid report cutoff hour: {cutoff_hour}"),
        })?
        .and_utc();
    Ok((start, end))
}

/// Builds the Z-report for one business date.
///
/// Sales are revenue-eligible invoices created inside the window. Each line's
/// net and VAT are scaled by the document discount before bucketing, which is
/// the one place a document-level discount changes the per-rate net/VAT
/// split. Tender rows tolerate negative payment amounts even though the
/// ledger never records them today.
pub async fn z_report(
    db: &DatabaseConnection,
    business_date: NaiveDate,
    cutoff_hour: u32,
) -> Result<ZReport> {
    let (window_start, window_end) = business_window(business_date, cutoff_hour)?;

    let invoices = Document::find()
        .filter(document::Column::Kind.eq(DocumentKind::Invoice.as_str()))
        .filter(document::Column::RevenueEligible.eq(true))
        .filter(document::Column::CreatedAt.gte(window_start))
        .filter(document::Column::CreatedAt.lt(window_end))
        .all(db)
        .await?;

    let mut buckets: BTreeMap<i32, (f64, f64, f64)> = BTreeMap::new();
    let mut gross_sales = 0.0;
    for invoice in &invoices {
        gross_sales += invoice.final_amount;
        let scale = 1.0 - f64::from(invoice.discount_pct) / 100.0;
        let lines = LineItem::find()
            .filter(line_item::Column::DocumentId.eq(invoice.id))
            .all(db)
            .await?;
        for line in lines {
            let entry = buckets.entry(line.vat_rate_pct).or_insert((0.0, 0.0, 0.0));
            entry.0 += (line.total_gross - line.vat_amount) * scale;
            entry.1 += line.vat_amount * scale;
            entry.2 += line.total_gross * scale;
        }
    }

    let rate_buckets: Vec<RateBucket> = buckets
        .into_iter()
        .map(|(pct, (net, vat, gross))| RateBucket {
            vat_rate_pct: pct,
            fiscal_flag: calc::VatRate::from_percent(pct)
                .map_or(String::new(), |r| r.fiscal_flag().to_string()),
            net_excl_vat: calc::round2(net),
            vat_amount: calc::round2(vat),
            gross_incl_vat: calc::round2(gross),
        })
        .collect();

    let total_net = calc::round2(rate_buckets.iter().map(|b| b.net_excl_vat).sum());
    let total_vat = calc::round2(rate_buckets.iter().map(|b| b.vat_amount).sum());
    let total_gross = calc::round2(rate_buckets.iter().map(|b| b.gross_incl_vat).sum());

    let window_payments = Payment::find()
        .filter(payment::Column::PaidAt.gte(window_start))
        .filter(payment::Column::PaidAt.lt(window_end))
        .all(db)
        .await?;

    let mut by_method: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for paid in &window_payments {
        let method = if paid.method.trim().is_empty() {
            "Other".to_string()
        } else {
            paid.method.clone()
        };
        let entry = by_method.entry(method).or_insert((0.0, 0.0));
        if paid.amount >= 0.0 {
            entry.0 += paid.amount;
        } else {
            entry.1 += -paid.amount;
        }
    }
    let tenders: Vec<TenderTotals> = by_method
        .into_iter()
        .map(|(method, (payments, refunds))| TenderTotals {
            method,
            payments_total: calc::round2(payments),
            refunds_total: calc::round2(refunds),
        })
        .collect();

    let payments_total = calc::round2(tenders.iter().map(|t| t.payments_total).sum());
    let refunds_total = calc::round2(tenders.iter().map(|t| t.refunds_total).sum());

    Ok(ZReport {
        business_date,
        window_start,
        window_end,
        invoice_count: invoices.len(),
        gross_sales: calc::round2(gross_sales),
        rate_buckets,
        total_net,
        total_vat,
        total_gross,
        tenders,
        payments_total,
        refunds_total,
        net_received: calc::round2(payments_total - refunds_total),
    })
}
