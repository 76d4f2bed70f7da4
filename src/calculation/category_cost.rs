//! Cost of a single category of activities.

use rust_decimal::Decimal;

use crate::config::CostConfig;
use crate::models::{CareTier, CategoryEntry, CustomRates};

use super::hours::{calculate_monthly_hours, calculate_weekly_hours};
use super::monthly_cost::calculate_monthly_cost;

/// Sums the weekly minutes of every usable record in a category.
///
/// Malformed entries and records without a numeric `totalMinutes`
/// contribute nothing.
pub fn sum_category_minutes(category: &CategoryEntry) -> Decimal {
    category
        .records()
        .filter_map(|record| record.total_minutes)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Calculates the monthly cost of one category for a tier.
///
/// The category's minutes are summed first and converted once, so
/// per-activity costs are never rounded individually.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_total_cost_for_category;
/// use attendant_care_engine::config::CostConfig;
/// use attendant_care_engine::models::{CareTier, CategoryEntry};
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let category = CategoryEntry::from(json!({
///     "a": { "totalMinutes": 60 },
///     "b": { "totalMinutes": 120 },
///     "c": null,
/// }));
///
/// let cost = calculate_total_cost_for_category(&category, CareTier::Level1, None, &CostConfig::default());
/// assert_eq!(cost, Decimal::new(19221, 2));
/// ```
pub fn calculate_total_cost_for_category(
    category: &CategoryEntry,
    tier: CareTier,
    custom_rates: Option<&CustomRates>,
    config: &CostConfig,
) -> Decimal {
    let weekly_minutes = sum_category_minutes(category);
    let weekly_hours = calculate_weekly_hours(weekly_minutes);
    let monthly_hours = calculate_monthly_hours(weekly_hours, config);
    calculate_monthly_cost(monthly_hours, tier, custom_rates, config)
}
