//! Summary models for an attendant care cost calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CareTier;

/// Hours and cost for one care tier.
///
/// # Example
///
/// ```
/// use attendant_care_engine::models::TierSummary;
///
/// let empty = TierSummary::default();
/// assert!(empty.is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    /// Sum of every activity's weekly minutes, before hour conversion.
    pub minutes_per_week: Decimal,
    /// Weekly hours, rounded to 2 decimal places.
    pub weekly_hours: Decimal,
    /// Monthly hours, rounded to 2 decimal places.
    pub monthly_hours: Decimal,
    /// Monthly cost at the resolved hourly rate, rounded to 2 decimal places.
    pub monthly_cost: Decimal,
}

impl TierSummary {
    /// Returns true if every field is zero.
    pub fn is_zero(&self) -> bool {
        self.minutes_per_week.is_zero()
            && self.weekly_hours.is_zero()
            && self.monthly_hours.is_zero()
            && self.monthly_cost.is_zero()
    }
}

/// Totals across all three care tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    /// Sum of the tiers' monthly hours.
    pub total_monthly_hours: Decimal,
    /// Sum of the tiers' monthly costs.
    pub total_monthly_cost: Decimal,
    /// Twelve times the total monthly cost.
    pub annual_cost: Decimal,
}

/// The complete output of one cost evaluation.
///
/// Serialises to the shape the summary view expects:
///
/// ```text
/// { "level1": {...}, "level2": {...}, "level3": {...},
///   "summary": { "totalMonthlyHours": ..., "totalMonthlyCost": ..., "annualCost": ... } }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Level 1 figures.
    pub level1: TierSummary,
    /// Level 2 figures.
    pub level2: TierSummary,
    /// Level 3 figures.
    pub level3: TierSummary,
    /// Cross-tier totals.
    pub summary: CostTotals,
}

impl Summary {
    /// Returns the figures for `tier`.
    pub fn tier(&self, tier: CareTier) -> &TierSummary {
        match tier {
            CareTier::Level1 => &self.level1,
            CareTier::Level2 => &self.level2,
            CareTier::Level3 => &self.level3,
        }
    }

    /// Returns true if every figure in the summary is zero.
    pub fn is_zero(&self) -> bool {
        CareTier::ALL.iter().all(|tier| self.tier(*tier).is_zero())
            && self.summary.total_monthly_hours.is_zero()
            && self.summary.total_monthly_cost.is_zero()
            && self.summary.annual_cost.is_zero()
    }
}
