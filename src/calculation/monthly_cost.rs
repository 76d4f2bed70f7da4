//! Hourly rate resolution and monthly cost.
//!
//! A tier is costed at its framework rate from [`CostConfig`] unless the
//! caller supplied a custom rate for it. A custom rate only counts when it is
//! non-zero; a zero override falls back to the framework rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CostConfig;
use crate::models::{CareTier, CustomRates};

use super::rounding::round_2dp;

/// Where a resolved hourly rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// A caller-supplied override.
    Custom,
    /// The configured rate for the tier.
    Framework,
}

/// An hourly rate together with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    /// The hourly rate to apply.
    pub rate: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
}

/// Determines the hourly rate for a tier.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::{RateSource, resolve_hourly_rate};
/// use attendant_care_engine::config::CostConfig;
/// use attendant_care_engine::models::{CareTier, CustomRates};
/// use rust_decimal::Decimal;
///
/// let config = CostConfig::default();
///
/// let custom = CustomRates::new().with_rate(CareTier::Level1, Decimal::from(20));
/// let resolved = resolve_hourly_rate(CareTier::Level1, Some(&custom), &config);
/// assert_eq!(resolved.rate, Decimal::from(20));
/// assert_eq!(resolved.source, RateSource::Custom);
///
/// // A zero override is ignored.
/// let zero = CustomRates::new().with_rate(CareTier::Level1, Decimal::ZERO);
/// let resolved = resolve_hourly_rate(CareTier::Level1, Some(&zero), &config);
/// assert_eq!(resolved.rate, Decimal::new(1490, 2));
/// assert_eq!(resolved.source, RateSource::Framework);
/// ```
pub fn resolve_hourly_rate(
    tier: CareTier,
    custom_rates: Option<&CustomRates>,
    config: &CostConfig,
) -> ResolvedRate {
    match custom_rates
        .and_then(|rates| rates.get(tier))
        .filter(|rate| !rate.is_zero())
    {
        Some(rate) => ResolvedRate {
            rate,
            source: RateSource::Custom,
        },
        None => ResolvedRate {
            rate: config.tier_rates.get(tier),
            source: RateSource::Framework,
        },
    }
}

/// Calculates the monthly cost of care for one tier, rounded to 2 decimal places.
///
/// # Arguments
///
/// * `monthly_hours` - The tier's monthly hours
/// * `tier` - The care tier being costed
/// * `custom_rates` - Optional overrides; a zero override is ignored
/// * `config` - The framework rates used when no override applies
///
/// # Returns
///
/// Returns `monthly_hours × rate`, or zero when `monthly_hours` is zero.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_monthly_cost;
/// use attendant_care_engine::config::CostConfig;
/// use attendant_care_engine::models::CareTier;
/// use rust_decimal::Decimal;
///
/// let cost = calculate_monthly_cost(Decimal::from(10), CareTier::Level1, None, &CostConfig::default());
/// assert_eq!(cost, Decimal::from(149));
/// ```
pub fn calculate_monthly_cost(
    monthly_hours: Decimal,
    tier: CareTier,
    custom_rates: Option<&CustomRates>,
    config: &CostConfig,
) -> Decimal {
    if monthly_hours.is_zero() {
        return Decimal::ZERO;
    }
    let resolved = resolve_hourly_rate(tier, custom_rates, config);
    round_2dp(monthly_hours.saturating_mul(resolved.rate))
}
