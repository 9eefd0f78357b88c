/// Pure VAT and discount arithmetic, no database involvement
pub mod calc;

/// Document lifecycle: drafts, line item replacement, discounts, conversion
pub mod document;

/// Exactly-once stock dispensing for saved documents
pub mod inventory;

/// Payment recording and balance reconciliation
pub mod payment;

/// Printable document payloads
pub mod render;

/// Business-day revenue aggregation (Z-report)
pub mod report;
