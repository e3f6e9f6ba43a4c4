//! Currency amount utilities.
//!
//! ## Overview
//!
//! All amounts in the engine are [`rust_decimal::Decimal`]. Shares are kept
//! at full precision while balances accumulate; rounding happens only when a
//! balance or a payment leaves the engine.
//!
//! ## Rounding
//!
//! - [`round_money`] rounds half away from zero, the usual currency rule.
//! - [`round_conserving`] rounds a whole vector of balances so that the
//!   rounded values still add up to the rounded total (largest remainder).
//!
//! ## Examples
//!
//! ```
//! use tripsettle::types::money::{parse_amount, format_money, round_money};
//!
//! let share = parse_amount("100").unwrap() / parse_amount("3").unwrap();
//! assert_eq!(format_money(round_money(share, 2), 2), "33.33");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Decimal places used when presenting amounts
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Smallest presented amount: 0.01
///
/// Remainders below this are treated as settled.
pub const DEFAULT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a decimal string into an amount
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::types::money::parse_amount;
///
/// assert_eq!(parse_amount("12.50"), Some(Decimal::new(1250, 2)));
/// assert_eq!(parse_amount(" 7 "), Some(Decimal::from(7)));
/// assert_eq!(parse_amount("seven"), None);
/// ```
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

/// One unit of the last presented decimal place (0.01 for `dp = 2`)
#[inline]
pub fn unit(dp: u32) -> Decimal {
    Decimal::new(1, dp)
}

/// Round to `dp` places, half away from zero
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::types::money::round_money;
///
/// assert_eq!(round_money(Decimal::new(1005, 3), 2), Decimal::new(101, 2));
/// assert_eq!(round_money(Decimal::new(-1005, 3), 2), Decimal::new(-101, 2));
/// ```
pub fn round_money(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly `dp` decimal places
pub fn format_money(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_money(value, dp))
}

/// Amount as an integer count of minor units (cents for `dp = 2`)
///
/// Returns `None` if the value does not fit in an `i64`.
pub fn to_minor_units(value: Decimal, dp: u32) -> Option<i64> {
    let scale = Decimal::from(10i64.checked_pow(dp)?);
    round_money(value, dp).checked_mul(scale)?.to_i64()
}

/// Build an amount from an integer count of minor units
pub fn from_minor_units(units: i64, dp: u32) -> Decimal {
    Decimal::new(units, dp)
}

// ============================================================================
// Vector Rounding
// ============================================================================

/// Round a set of balances so the rounded values sum to the rounded total.
///
/// Each value is floored to `dp` places, then the cents lost to flooring are
/// handed back one by one to the values with the largest discarded
/// remainder. Equal remainders are served in input order, so the result is
/// deterministic.
///
/// For balances that sum to zero this guarantees the rounded balances sum to
/// exactly zero, leaving no stray cent for the matcher.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::types::money::round_conserving;
///
/// // 100 paid by the first member, shared three ways
/// let third = Decimal::from(100) / Decimal::from(3);
/// let balances = [Decimal::from(100) - third, -third, -third];
///
/// let rounded = round_conserving(&balances, 2);
/// assert_eq!(rounded, vec![Decimal::new(6667, 2), Decimal::new(-3333, 2), Decimal::new(-3334, 2)]);
/// assert_eq!(rounded.iter().sum::<Decimal>(), Decimal::ZERO);
/// ```
pub fn round_conserving(values: &[Decimal], dp: u32) -> Vec<Decimal> {
    let step = unit(dp);

    let mut floored = Vec::with_capacity(values.len());
    let mut remainders = Vec::with_capacity(values.len());
    let mut exact_total = Some(Decimal::ZERO);
    let mut floored_total = Some(Decimal::ZERO);

    for value in values {
        let floor = value.round_dp_with_strategy(dp, RoundingStrategy::ToNegativeInfinity);
        remainders.push(*value - floor);
        floored.push(floor);
        exact_total = exact_total.and_then(|t| t.checked_add(*value));
        floored_total = floored_total.and_then(|t| t.checked_add(floor));
    }

    // Totals out of Decimal range: round each value on its own
    let (Some(exact_total), Some(floored_total)) = (exact_total, floored_total) else {
        return round_independent(values, dp);
    };

    let missing = round_money(exact_total, dp)
        .checked_sub(floored_total)
        .and_then(|gap| gap.checked_div(step))
        .and_then(|units| units.round().to_usize())
        .unwrap_or(0);

    let mut candidates: Vec<usize> = (0..values.len())
        .filter(|&i| !remainders[i].is_zero())
        .collect();
    // Stable sort: equal remainders keep input order
    candidates.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));

    for i in candidates.into_iter().take(missing) {
        if let Some(up) = floored[i].checked_add(step) {
            floored[i] = up;
        }
    }

    floored
}

/// Round each balance on its own with [`round_money`]
pub fn round_independent(values: &[Decimal], dp: u32) -> Vec<Decimal> {
    values.iter().map(|v| round_money(*v, dp)).collect()
}

// ============================================================================
// Comparison Helpers
// ============================================================================

/// `true` if |a - b| <= tolerance
pub fn approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

/// `true` if the amount is strictly below `epsilon` in magnitude
#[inline]
pub fn is_negligible(value: Decimal, epsilon: Decimal) -> bool {
    value.abs() < epsilon
}

// ============================================================================
// Unit Tests
// ============================================================================
