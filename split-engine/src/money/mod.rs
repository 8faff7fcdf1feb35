//! Money conversion helpers for the allocation engine
//!
//! Wire amounts travel as f64. All arithmetic inside the engine happens on
//! [`Decimal`] values and minor-unit integers; conversion back to f64 rounds
//! half away from zero at the currency's exponent.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

// ============================================================================
// Constants
// ============================================================================

/// Maximum allowed monetary amount
///
/// Generous enough for zero-decimal currencies (an IDR banquet runs to eight
/// figures) while keeping scaled minor units well inside i64.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Maximum allowed item quantity
pub const MAX_QUANTITY: i32 = 9_999;

// ============================================================================
// Currency exponents
// ============================================================================

/// Minor-unit exponent for an ISO 4217 currency code
///
/// Zero-decimal currencies round to whole units; unknown codes fall back to
/// the common two decimals.
pub fn minor_unit_exponent(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "IDR" | "JPY" | "KRW" | "VND" => 0,
        "BHD" | "KWD" | "OMR" => 3,
        _ => 2,
    }
}

/// One minor unit of a currency as a Decimal, e.g. 0.01 for exponent 2
///
/// Doubles as the comparison tolerance: amounts closer than one minor unit
/// are the same money.
pub fn minor_unit(exponent: u32) -> Decimal {
    Decimal::new(1, exponent)
}

/// Scale factor from major to minor units, e.g. 100 for exponent 2
pub fn minor_unit_scale(exponent: u32) -> Decimal {
    Decimal::from(10i64.pow(exponent))
}

// ============================================================================
// Conversions
// ============================================================================

/// Convert an f64 amount to Decimal for precise arithmetic
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!("Failed to convert f64 {} to Decimal, using 0", value);
        Decimal::ZERO
    })
}

/// Convert a Decimal back to f64, rounded to the currency exponent
pub fn to_f64(value: Decimal, exponent: u32) -> f64 {
    value
        .round_dp_with_strategy(exponent, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: a Decimal rounded to a currency exponent is always representable as f64
        .expect("rounded Decimal is representable as f64")
}

/// Round a Decimal amount to whole minor units
pub fn to_minor_units(value: Decimal, exponent: u32) -> i64 {
    (value * minor_unit_scale(exponent))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // SAFETY: amounts and their list sums are validated against MAX_AMOUNT, so the scaled value fits i64
        .expect("scaled amount fits i64")
}

/// Minor units back to a Decimal amount in major units
pub fn from_minor_units(units: i64, exponent: u32) -> Decimal {
    Decimal::new(units, exponent)
}

/// Minor units straight to the f64 wire representation
pub fn minor_to_f64(units: i64, exponent: u32) -> f64 {
    to_f64(from_minor_units(units, exponent), exponent)
}

// ============================================================================
// Comparison and aggregation
// ============================================================================

/// Whether two f64 amounts are equal within one minor unit
pub fn money_eq(a: f64, b: f64, exponent: u32) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < minor_unit(exponent)
}

/// Sum f64 amounts with Decimal precision, avoiding accumulation error
pub fn sum_amounts<I>(amounts: I, exponent: u32) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let total: Decimal = amounts.into_iter().map(to_decimal).sum();
    to_f64(total, exponent)
}
