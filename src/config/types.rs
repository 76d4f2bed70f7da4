//! Configuration types for attendant care costing.
//!
//! This module contains the immutable [`CostConfig`] the calculation
//! functions read, and the strongly-typed structures deserialized from the
//! YAML rate schedule.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::CareTier;

/// Default Level 1 hourly rate (routine personal care).
pub const DEFAULT_LEVEL_1_RATE: Decimal = Decimal::from_parts(1490, 0, 0, false, 2);

/// Default Level 2 hourly rate (basic supervisory functions).
pub const DEFAULT_LEVEL_2_RATE: Decimal = Decimal::from_parts(1400, 0, 0, false, 2);

/// Default Level 3 hourly rate (complex health care and hygiene functions).
pub const DEFAULT_LEVEL_3_RATE: Decimal = Decimal::from_parts(2111, 0, 0, false, 2);

/// Weeks-per-month factor used to turn weekly hours into monthly hours.
///
/// Exactly 4.3, not 52/12.
pub const WEEKLY_TO_MONTHLY: Decimal = Decimal::from_parts(43, 0, 0, false, 1);

/// Hourly rates for the three care tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRates {
    /// Level 1 hourly rate.
    #[serde(rename = "LEVEL_1")]
    pub level_1: Decimal,
    /// Level 2 hourly rate.
    #[serde(rename = "LEVEL_2")]
    pub level_2: Decimal,
    /// Level 3 hourly rate.
    #[serde(rename = "LEVEL_3")]
    pub level_3: Decimal,
}

impl TierRates {
    /// Returns the rate for `tier`.
    pub fn get(&self, tier: CareTier) -> Decimal {
        match tier {
            CareTier::Level1 => self.level_1,
            CareTier::Level2 => self.level_2,
            CareTier::Level3 => self.level_3,
        }
    }
}

impl Default for TierRates {
    fn default() -> Self {
        Self {
            level_1: DEFAULT_LEVEL_1_RATE,
            level_2: DEFAULT_LEVEL_2_RATE,
            level_3: DEFAULT_LEVEL_3_RATE,
        }
    }
}

/// The constants a cost calculation depends on.
///
/// Passed by reference into every calculation; callers override rates for
/// a single call through [`CustomRates`](crate::models::CustomRates) rather
/// than by changing a shared value.
///
/// # Example
///
/// ```
/// use attendant_care_engine::config::CostConfig;
/// use attendant_care_engine::models::CareTier;
/// use rust_decimal::Decimal;
///
/// let config = CostConfig::default();
/// assert_eq!(config.tier_rates.get(CareTier::Level3), Decimal::new(2111, 2));
/// assert_eq!(config.weekly_to_monthly, Decimal::new(43, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Framework hourly rate per tier.
    pub tier_rates: TierRates,
    /// Weekly-to-monthly conversion factor.
    pub weekly_to_monthly: Decimal,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            tier_rates: TierRates::default(),
            weekly_to_monthly: WEEKLY_TO_MONTHLY,
        }
    }
}

/// Metadata about the rate schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// Short identifier of the assessment framework (e.g., "form1").
    pub code: String,
    /// The human-readable name of the framework.
    pub name: String,
    /// The version of the schedule.
    pub version: String,
    /// The jurisdiction the schedule applies in.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

/// Display information for a care tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TierDefinition {
    /// The human-readable name of the tier.
    pub name: String,
    /// A description of the care the tier covers.
    pub description: String,
    /// The assessment form part the tier corresponds to.
    pub form_part: String,
}

/// Tier definitions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// Map of tier rate key (e.g., "LEVEL_1") to definition.
    pub tiers: HashMap<String, TierDefinition>,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Weekly-to-monthly conversion factor.
    #[serde(default = "default_weekly_to_monthly")]
    pub weekly_to_monthly: Decimal,
    /// Hourly rate per tier.
    pub hourly: TierRates,
}

fn default_weekly_to_monthly() -> Decimal {
    WEEKLY_TO_MONTHLY
}

impl RateConfig {
    /// Returns the calculation constants defined by this rate file.
    pub fn cost_config(&self) -> CostConfig {
        CostConfig {
            tier_rates: self.hourly,
            weekly_to_monthly: self.weekly_to_monthly,
        }
    }
}

/// The complete rate schedule loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Schedule metadata.
    metadata: ScheduleMetadata,
    /// Tier definitions keyed by rate key.
    tiers: HashMap<String, TierDefinition>,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl ScheduleConfig {
    /// Creates a new ScheduleConfig from its component parts.
    pub fn new(
        metadata: ScheduleMetadata,
        tiers: HashMap<String, TierDefinition>,
        rates: Vec<RateConfig>,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            tiers,
            rates: sorted_rates,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns all tier definitions.
    pub fn tiers(&self) -> &HashMap<String, TierDefinition> {
        &self.tiers
    }

    /// Returns all rate configurations.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// Returns the rate configuration in force on `date`.
    pub fn rates_on(&self, date: NaiveDate) -> Option<&RateConfig> {
        self.rates.iter().rfind(|rc| rc.effective_date <= date)
    }
}
