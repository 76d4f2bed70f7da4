//! Full cost summary across the three care tiers.

use std::borrow::Cow;

use rust_decimal::Decimal;

use crate::config::CostConfig;
use crate::models::{CareTier, CostTotals, CustomRates, FormData, Summary, TierActivities, TierSummary};

use super::category_cost::sum_category_minutes;
use super::hours::{calculate_monthly_hours, calculate_weekly_hours};
use super::monthly_cost::calculate_monthly_cost;
use super::rounding::round_2dp;

/// Months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Sums weekly minutes across every category of a tier.
///
/// A missing or malformed tier sums to zero.
pub fn sum_tier_minutes(activities: Option<&TierActivities>) -> Decimal {
    activities
        .into_iter()
        .flat_map(|tier| tier.categories())
        .map(sum_category_minutes)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Converts a tier's weekly minutes into its hours and cost.
pub fn calculate_tier_summary(
    minutes_per_week: Decimal,
    tier: CareTier,
    custom_rates: Option<&CustomRates>,
    config: &CostConfig,
) -> TierSummary {
    let weekly_hours = calculate_weekly_hours(minutes_per_week);
    let monthly_hours = calculate_monthly_hours(weekly_hours, config);
    let monthly_cost = calculate_monthly_cost(monthly_hours, tier, custom_rates, config);

    TierSummary {
        minutes_per_week,
        weekly_hours,
        monthly_hours,
        monthly_cost,
    }
}

/// Picks the rate overrides that apply to a calculation.
///
/// Overrides passed explicitly win, then `customRates` on the form, then
/// `summary.customRates` on the form. The first one present is used as a
/// whole; tables are never merged.
pub fn effective_custom_rates<'a>(
    form: &'a FormData,
    custom_rates: Option<&'a CustomRates>,
) -> Option<Cow<'a, CustomRates>> {
    custom_rates
        .or(form.custom_rates.as_ref())
        .map(Cow::Borrowed)
        // A top-level `customRates` of the wrong shape still counts as found:
        // it overrides nothing, and `summary.customRates` is not consulted.
        .or_else(|| {
            form.has_unusable_custom_rates()
                .then(|| Cow::Owned(CustomRates::new()))
        })
        .or_else(|| form.summary_custom_rates().map(Cow::Owned))
}

/// Calculates the complete cost summary for an attendant care form.
///
/// Never fails: missing levels, malformed categories and unusable records
/// all contribute zero. The result depends only on the arguments.
///
/// # Arguments
///
/// * `form` - The form data holding the three levels of activities
/// * `custom_rates` - Rate overrides that take precedence over any stored on the form
/// * `config` - The framework rates and weekly-to-monthly factor
///
/// # Returns
///
/// Returns a `Summary` with minutes, hours and cost for each tier, plus the
/// total monthly hours, total monthly cost and annual cost.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_summary;
/// use attendant_care_engine::config::CostConfig;
/// use attendant_care_engine::models::FormData;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let form = FormData::from(json!({
///     "level1": { "cat": { "a": { "totalMinutes": 60 }, "b": { "totalMinutes": 120 } } },
/// }));
///
/// let summary = calculate_summary(&form, None, &CostConfig::default());
/// assert_eq!(summary.level1.weekly_hours, Decimal::from(3));
/// assert_eq!(summary.level1.monthly_hours, Decimal::new(129, 1));
/// assert_eq!(summary.level1.monthly_cost, Decimal::new(19221, 2));
/// assert_eq!(summary.summary.annual_cost, Decimal::new(230652, 2));
/// ```
pub fn calculate_summary(
    form: &FormData,
    custom_rates: Option<&CustomRates>,
    config: &CostConfig,
) -> Summary {
    let rates = effective_custom_rates(form, custom_rates);
    let rates = rates.as_deref();

    let tier_summary = |tier: CareTier| {
        calculate_tier_summary(sum_tier_minutes(form.tier(tier)), tier, rates, config)
    };
    let level1 = tier_summary(CareTier::Level1);
    let level2 = tier_summary(CareTier::Level2);
    let level3 = tier_summary(CareTier::Level3);

    let tiers = [&level1, &level2, &level3];
    let total_monthly_hours = round_2dp(
        tiers
            .iter()
            .map(|t| t.monthly_hours)
            .fold(Decimal::ZERO, Decimal::saturating_add),
    );
    let total_monthly_cost = round_2dp(
        tiers
            .iter()
            .map(|t| t.monthly_cost)
            .fold(Decimal::ZERO, Decimal::saturating_add),
    );
    let annual_cost = round_2dp(total_monthly_cost.saturating_mul(MONTHS_PER_YEAR));

    Summary {
        level1,
        level2,
        level3,
        summary: CostTotals {
            total_monthly_hours,
            total_monthly_cost,
            annual_cost,
        },
    }
}
