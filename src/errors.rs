//! Unified error types for the billing core.
//!
//! Validation and business-rule failures are typed variants the UI layer can
//! match on and display; `Database` wraps storage failures after the
//! surrounding transaction has rolled back.

use thiserror::Error;

/// All errors the billing core can surface to its callers.
#[derive(Debug, Error)]
pub enum Error {
    /// Line quantity was zero or negative.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// A monetary amount was invalid (non-positive, not finite, or exceeding
    /// the remaining balance for payments).
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A discount percentage was outside its allowed range.
    #[error("Invalid discount percentage: {pct}")]
    InvalidDiscount {
        /// The rejected percentage
        pct: f64,
    },

    /// An unsupported VAT rate was supplied.
    #[error("Unsupported VAT rate: {pct}%")]
    UnsupportedVatRate {
        /// The rejected whole-number percentage
        pct: i32,
    },

    /// A payment was dated more than the allowed clock skew into the future.
    #[error("Payment date {paid_at} is in the future")]
    FutureDated {
        /// The rejected payment timestamp
        paid_at: chrono::DateTime<chrono::Utc>,
    },

    /// A payment was attempted against a non-payable document.
    #[error("Document {document_id} ({kind}) is not payable")]
    NotPayable {
        /// The document the payment targeted
        document_id: i64,
        /// The document's kind
        kind: String,
    },

    /// A walk-in document was created without an owner name.
    #[error("Walk-in documents require an owner name")]
    MissingOwnerName,

    /// A referenced document does not exist.
    #[error("Document not found: {id}")]
    DocumentNotFound {
        /// The missing document id
        id: i64,
    },

    /// A referenced payment does not exist.
    #[error("Payment not found: {id}")]
    PaymentNotFound {
        /// The missing payment id
        id: i64,
    },

    /// Estimate-to-invoice conversion was attempted on a non-estimate.
    #[error("Document {id} is a {kind}, only estimates can be converted")]
    NotAnEstimate {
        /// The document id
        id: i64,
        /// Its actual kind
        kind: String,
    },

    /// Configuration loading or validation failed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Storage-layer failure; the enclosing transaction has been rolled back.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config file reads, env setup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
