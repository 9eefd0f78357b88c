//! Pure VAT and discount arithmetic.
//!
//! Everything here is synchronous and side-effect free. Monetary values are
//! rounded to two decimals for storage, except `unit_net_price` which keeps
//! four decimals so that multiplying back by large quantities does not
//! compound rounding error.

use crate::errors::{Error, Result};

/// The fixed set of VAT rates documents may carry.
///
/// Keeping the rates a closed enumeration is what lets the daily revenue
/// rollup group lines exactly by rate instead of bucketing free-form floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VatRate {
    /// 0% - exempt services
    Zero,
    /// 5% - reduced rate
    Reduced,
    /// 19% - standard rate
    Standard,
}

impl VatRate {
    /// The rate as a whole percentage.
    #[must_use]
    pub const fn percent(self) -> i32 {
        match self {
            Self::Zero => 0,
            Self::Reduced => 5,
            Self::Standard => 19,
        }
    }

    /// The rate as a fraction, e.g. `0.19`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.percent()) / 100.0
    }

    /// Letter printed next to the line on fiscal receipts.
    #[must_use]
    pub const fn fiscal_flag(self) -> &'static str {
        match self {
            Self::Zero => "",
            Self::Reduced => "B",
            Self::Standard => "C",
        }
    }

    /// Parses a whole-percentage rate, rejecting anything outside the fixed set.
    pub fn from_percent(pct: i32) -> Result<Self> {
        match pct {
            0 => Ok(Self::Zero),
            5 => Ok(Self::Reduced),
            19 => Ok(Self::Standard),
            _ => Err(Error::UnsupportedVatRate { pct }),
        }
    }
}

/// Fully derived monetary fields for one line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAmounts {
    /// Net price of a single unit before discount, four decimals
    pub unit_net_price: f64,
    /// Net amount after the per-line discount, two decimals
    pub net_after_discount: f64,
    /// VAT charged on the discounted net, two decimals
    pub vat_amount: f64,
    /// Net amount removed by the per-line discount, two decimals
    pub discount_amount: f64,
    /// Gross amount charged for the line, two decimals
    pub total_gross: f64,
}

/// Rounds to two decimals, the precision of every stored money column.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to four decimals, used only for `unit_net_price`.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn validate_line(quantity: i32, discount_pct: f64) -> Result<()> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    if !(0.0..100.0).contains(&discount_pct) {
        return Err(Error::InvalidDiscount { pct: discount_pct });
    }
    Ok(())
}

/// Computes line amounts from a unit net price.
///
/// ```text
/// base            = unit_net_price x quantity
/// discount_amount = base x discount_pct/100
/// net_after_disc  = base - discount_amount
/// vat_amount      = net_after_disc x rate
/// total_gross     = net_after_disc + vat_amount
/// ```
pub fn forward(
    quantity: i32,
    unit_net_price: f64,
    rate: VatRate,
    discount_pct: f64,
) -> Result<LineAmounts> {
    validate_line(quantity, discount_pct)?;
    if unit_net_price <= 0.0 || !unit_net_price.is_finite() {
        return Err(Error::InvalidAmount {
            amount: unit_net_price,
        });
    }
    let base = unit_net_price * f64::from(quantity);
    let discount_amount = base * discount_pct / 100.0;
    let net_after_discount = base - discount_amount;
    let vat_amount = net_after_discount * rate.fraction();
    Ok(LineAmounts {
        unit_net_price: round4(unit_net_price),
        net_after_discount: round2(net_after_discount),
        vat_amount: round2(vat_amount),
        discount_amount: round2(discount_amount),
        total_gross: round2(net_after_discount + vat_amount),
    })
}

/// Derives net, VAT, and unit price from a tax-inclusive total.
///
/// Receptionists enter the price the client actually pays, so the gross total
/// `T` is authoritative and everything else is back-computed:
///
/// ```text
/// net_after_disc = T / (1 + rate)
/// base           = net_after_disc / (1 - discount_pct/100)
/// unit_net_price = base / quantity
/// vat_amount     = T - net_after_disc
/// ```
pub fn reverse(
    quantity: i32,
    total_gross: f64,
    rate: VatRate,
    discount_pct: f64,
) -> Result<LineAmounts> {
    validate_line(quantity, discount_pct)?;
    if total_gross <= 0.0 || !total_gross.is_finite() {
        return Err(Error::InvalidAmount {
            amount: total_gross,
        });
    }
    let net_after_discount = total_gross / (1.0 + rate.fraction());
    let base = net_after_discount / (1.0 - discount_pct / 100.0);
    let unit_net_price = base / f64::from(quantity);
    Ok(LineAmounts {
        unit_net_price: round4(unit_net_price),
        net_after_discount: round2(net_after_discount),
        vat_amount: round2(total_gross - net_after_discount),
        discount_amount: round2(base - net_after_discount),
        total_gross: round2(total_gross),
    })
}

/// Applies the whole-document discount to the gross subtotal.
///
/// The document discount multiplies the already-tax-inclusive subtotal, it is
/// never re-derived per line.
pub fn document_final_amount(gross_subtotal: f64, discount_pct: i32) -> Result<f64> {
    if !(0..=100).contains(&discount_pct) {
        return Err(Error::InvalidDiscount {
            pct: f64::from(discount_pct),
        });
    }
    Ok(round2(
        gross_subtotal * (1.0 - f64::from(discount_pct) / 100.0),
    ))
}
