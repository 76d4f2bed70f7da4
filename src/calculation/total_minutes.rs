//! Per-activity weekly minutes.
//!
//! This module turns minutes per occurrence and occurrences per week into
//! the `totalMinutes` figure every later stage of the calculation reads.

use rust_decimal::Decimal;

use crate::models::{ActivityRecord, CareTier, FormData};

use super::rounding::round_whole;

/// Calculates total weekly minutes for one activity.
///
/// Returns 0 if either input is missing. Otherwise the inputs are multiplied
/// first and the product is rounded to the nearest whole minute, so
/// fractional inputs are allowed. Negative inputs are not rejected.
///
/// # Arguments
///
/// * `minutes` - Minutes spent per occurrence
/// * `times_per_week` - Occurrences per week
///
/// # Returns
///
/// Returns the weekly minutes as a whole number, or zero if the product
/// overflows.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_total_minutes;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let total = calculate_total_minutes(Some(Decimal::from(30)), Some(Decimal::from(7)));
/// assert_eq!(total, Decimal::from(210));
///
/// // 45 x 3.5 = 157.5, which rounds to 158
/// let total = calculate_total_minutes(
///     Some(Decimal::from(45)),
///     Some(Decimal::from_str("3.5").unwrap()),
/// );
/// assert_eq!(total, Decimal::from(158));
///
/// assert_eq!(calculate_total_minutes(None, Some(Decimal::from(7))), Decimal::ZERO);
/// ```
pub fn calculate_total_minutes(minutes: Option<Decimal>, times_per_week: Option<Decimal>) -> Decimal {
    match (minutes, times_per_week) {
        (Some(minutes), Some(times_per_week)) => {
            // Overflow only happens for values no form could hold; treat it
            // like any other unusable input.
            minutes
                .checked_mul(times_per_week)
                .map(round_whole)
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Recomputes `totalMinutes` on every activity record in the form.
///
/// Records that carry neither `minutes` nor `timesPerWeek` keep whatever
/// total they already have, so forms holding only weekly totals pass through
/// unchanged. Returns the number of records whose total was recomputed.
pub fn refresh_total_minutes(form: &mut FormData) -> usize {
    let mut refreshed = 0;
    for tier in CareTier::ALL {
        let Some(activities) = form.tier_mut(tier) else {
            continue;
        };
        for category in activities.categories_mut() {
            for record in category.records_mut() {
                if refresh_record(record) {
                    refreshed += 1;
                }
            }
        }
    }
    refreshed
}

fn refresh_record(record: &mut ActivityRecord) -> bool {
    if record.minutes.is_none() && record.times_per_week.is_none() {
        return false;
    }
    record.total_minutes = Some(calculate_total_minutes(
        record.minutes,
        record.times_per_week,
    ));
    true
}
