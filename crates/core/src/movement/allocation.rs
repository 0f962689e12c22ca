//! Exact equal splitting of an amount into installment shares.
//!
//! The total is rounded to the minimal currency unit, each share is the
//! per-part value truncated to that unit, and the leftover units go one
//! each to the first shares. The shares always sum to the rounded total.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Smallest representable amount for `decimal_places`, e.g. `0.01` for 2.
#[must_use]
pub fn minimal_unit(decimal_places: u32) -> Decimal {
    Decimal::new(1, decimal_places)
}

/// Rounds an amount to the minimal currency unit.
#[must_use]
pub fn round_to_unit(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Splits `total` into `parts` shares whose sum equals the rounded total.
///
/// Returns an empty vector when `parts` is zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use bizdesk_core::movement::split_evenly;
///
/// assert_eq!(split_evenly(dec!(100), 3, 2), vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
#[must_use]
pub fn split_evenly(total: Decimal, parts: u32, decimal_places: u32) -> Vec<Decimal> {
    if parts == 0 {
        return vec![];
    }

    let rounded = round_to_unit(total, decimal_places);
    if parts == 1 {
        return vec![rounded];
    }

    let count = Decimal::from(parts);
    let unit = minimal_unit(decimal_places);

    let base = (rounded / count).round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
    let remainder = rounded - base * count;

    // Fewer than `parts` units by construction of `base`.
    let extra = (remainder / unit)
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_u32()
        .unwrap_or(0);

    (0..parts)
        .map(|i| if i < extra { base + unit } else { base })
        .collect()
}
