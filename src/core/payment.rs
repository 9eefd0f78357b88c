//! Payment ledger - Records payments and keeps document balances consistent.
//!
//! Every mutation re-runs `reconcile` inside the same database transaction,
//! so `remaining_balance` and `payment_status` can never drift from the
//! payments actually stored. Reconciliation is also invoked by the document
//! module whenever `final_amount` changes underneath existing payments.

use crate::{
    entities::{Document, Payment, document, payment},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Clock skew tolerated on payment timestamps coming from other terminals.
const FUTURE_SKEW_SECONDS: i64 = 60;

/// Half a cent, the tolerance used for money comparisons.
const CENT_EPSILON: f64 = 0.005;

/// Payment status of a document as shown in lists and on printouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Remaining balance is zero
    Paid,
    /// Some payments recorded, balance still open
    PartiallyPaid,
    /// No payments recorded yet
    Unpaid,
    /// Document is not payable (estimates, charity records)
    NotApplicable,
}

impl PaymentStatus {
    /// The status as stored in the `payment_status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::PartiallyPaid => "Partially Paid",
            Self::Unpaid => "Unpaid",
            Self::NotApplicable => "N/A",
        }
    }

    /// Parses a stored status string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Paid" => Some(Self::Paid),
            "Partially Paid" => Some(Self::PartiallyPaid),
            "Unpaid" => Some(Self::Unpaid),
            "N/A" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

/// Records a payment against a document and updates its balance.
///
/// Fails with [`Error::NotPayable`] for estimates and charity records, with
/// [`Error::InvalidAmount`] when the amount is non-positive or exceeds the
/// remaining balance, and with [`Error::FutureDated`] when `paid_at` is more
/// than 60 seconds ahead of the clock. The payment insert, the last-method
/// snapshot on the document, and reconciliation commit together.
pub async fn add_payment(
    db: &sea_orm::DatabaseConnection,
    document_id: i64,
    amount: f64,
    method: String,
    paid_at: DateTime<Utc>,
    notes: Option<String>,
) -> Result<payment::Model> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    if paid_at > Utc::now() + Duration::seconds(FUTURE_SKEW_SECONDS) {
        return Err(Error::FutureDated { paid_at });
    }

    let txn = db.begin().await?;

    let doc = Document::find_by_id(document_id)
        .one(&txn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    if !doc.payable {
        return Err(Error::NotPayable {
            document_id,
            kind: doc.kind,
        });
    }
    if amount > doc.remaining_balance + CENT_EPSILON {
        return Err(Error::InvalidAmount { amount });
    }

    let inserted = payment::ActiveModel {
        document_id: Set(document_id),
        paid_at: Set(paid_at),
        amount: Set(amount),
        method: Set(method.clone()),
        notes: Set(notes),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut active: document::ActiveModel = doc.into();
    active.payment_method = Set(Some(method));
    active.update(&txn).await?;

    reconcile(&txn, document_id).await?;

    txn.commit().await?;
    Ok(inserted)
}

/// Deletes a payment and re-reconciles the document it settled.
pub async fn delete_payment(db: &sea_orm::DatabaseConnection, payment_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let paid = Payment::find_by_id(payment_id)
        .one(&txn)
        .await?
        .ok_or(Error::PaymentNotFound { id: payment_id })?;

    let document_id = paid.document_id;
    paid.delete(&txn).await?;

    reconcile(&txn, document_id).await?;

    txn.commit().await?;
    Ok(())
}

/// All payments for a document, oldest first.
pub async fn payments_for_document(
    db: &sea_orm::DatabaseConnection,
    document_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::DocumentId.eq(document_id))
        .order_by_asc(payment::Column::PaidAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Recomputes `remaining_balance` and `payment_status` from stored payments.
///
/// Generic over `ConnectionTrait` so callers can run it inside their own
/// transaction. The remaining balance is clamped at zero; when the clamp
/// actually fires the document has been overpaid (usually because
/// `final_amount` shrank after a discount or line change) and a warning is
/// logged since the clamp hides the overpayment from the stored balance.
pub(crate) async fn reconcile<C: ConnectionTrait>(conn: &C, document_id: i64) -> Result<()> {
    let doc = Document::find_by_id(document_id)
        .one(conn)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })?;

    if !doc.payable {
        if doc.remaining_balance != 0.0
            || doc.payment_status != PaymentStatus::NotApplicable.as_str()
        {
            let mut active: document::ActiveModel = doc.into();
            active.remaining_balance = Set(0.0);
            active.payment_status = Set(PaymentStatus::NotApplicable.as_str().to_string());
            active.update(conn).await?;
        }
        return Ok(());
    }

    let total_paid: f64 = Payment::find()
        .filter(payment::Column::DocumentId.eq(document_id))
        .all(conn)
        .await?
        .iter()
        .map(|p| p.amount)
        .sum();

    let raw_remaining = doc.final_amount - total_paid;
    if raw_remaining < -CENT_EPSILON {
        tracing::warn!(
            document_id,
            final_amount = doc.final_amount,
            total_paid,
            overpaid = -raw_remaining,
            "remaining balance clamped to zero, document is overpaid"
        );
    }
    let remaining = crate::core::calc::round2(raw_remaining.max(0.0));

    let status = if remaining <= CENT_EPSILON {
        PaymentStatus::Paid
    } else if remaining < doc.final_amount - CENT_EPSILON {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Unpaid
    };

    let mut active: document::ActiveModel = doc.into();
    active.remaining_balance = Set(remaining);
    active.payment_status = Set(status.as_str().to_string());
    active.update(conn).await?;

    Ok(())
}
