//! Rounding helpers shared by the calculations.
//!
//! All rounding is half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole number.
pub(crate) fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to 2 decimal places.
pub(crate) fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
