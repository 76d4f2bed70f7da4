//! Weekly and monthly hour conversion.

use rust_decimal::Decimal;

use crate::config::CostConfig;

use super::rounding::round_2dp;

/// Minutes in an hour.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Converts total weekly minutes into weekly hours, rounded to 2 decimal places.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_weekly_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_weekly_hours(Decimal::from(120)), Decimal::from(2));
/// assert_eq!(calculate_weekly_hours(Decimal::from(100)), Decimal::new(167, 2));
/// assert_eq!(calculate_weekly_hours(Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn calculate_weekly_hours(total_minutes: Decimal) -> Decimal {
    if total_minutes.is_zero() {
        return Decimal::ZERO;
    }
    round_2dp(total_minutes / MINUTES_PER_HOUR)
}

/// Converts weekly hours into monthly hours, rounded to 2 decimal places.
///
/// Uses the configured weekly-to-monthly factor, 4.3 by default.
///
/// # Arguments
///
/// * `weekly_hours` - Hours of care per week
/// * `config` - Supplies the weekly-to-monthly factor
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_monthly_hours;
/// use attendant_care_engine::config::CostConfig;
/// use rust_decimal::Decimal;
///
/// let config = CostConfig::default();
/// assert_eq!(calculate_monthly_hours(Decimal::from(2), &config), Decimal::new(86, 1));
/// ```
pub fn calculate_monthly_hours(weekly_hours: Decimal, config: &CostConfig) -> Decimal {
    if weekly_hours.is_zero() {
        return Decimal::ZERO;
    }
    round_2dp(weekly_hours.saturating_mul(config.weekly_to_monthly))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_weekly_hours_exact_division() {
        assert_eq!(calculate_weekly_hours(dec("120")), dec("2"));
        assert_eq!(calculate_weekly_hours(dec("180")), dec("3"));
        assert_eq!(calculate_weekly_hours(dec("90")), dec("1.5"));
    }

    #[test]
    fn test_weekly_hours_rounds_to_two_places() {
        assert_eq!(calculate_weekly_hours(dec("100")), dec("1.67"));
        assert_eq!(calculate_weekly_hours(dec("1")), dec("0.02"));
        assert_eq!(calculate_weekly_hours(dec("158")), dec("2.63"));
    }

    #[test]
    fn test_weekly_hours_zero_is_zero() {
        assert_eq!(calculate_weekly_hours(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_hours_uses_factor_of_4_3() {
        let config = CostConfig::default();
        assert_eq!(calculate_monthly_hours(dec("2"), &config), dec("8.6"));
        assert_eq!(calculate_monthly_hours(dec("3"), &config), dec("12.9"));
        assert_eq!(calculate_monthly_hours(dec("1.67"), &config), dec("7.18"));
    }

    #[test]
    fn test_monthly_hours_zero_is_zero() {
        assert_eq!(
            calculate_monthly_hours(Decimal::ZERO, &CostConfig::default()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_monthly_hours_honours_configured_factor() {
        let config = CostConfig {
            weekly_to_monthly: dec("4.33"),
            ..CostConfig::default()
        };
        assert_eq!(calculate_monthly_hours(dec("10"), &config), dec("43.3"));
    }

    #[test]
    fn test_conversion_chain_for_120_minutes() {
        let config = CostConfig::default();
        let weekly = calculate_weekly_hours(dec("120"));
        assert_eq!(weekly, dec("2"));
        assert_eq!(calculate_monthly_hours(weekly, &config), dec("8.6"));
    }
}
