//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendant
//! care rate schedule from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::CareTier;

use super::types::{
    CostConfig, RateConfig, ScheduleConfig, ScheduleMetadata, TierDefinition, TiersConfig,
};

/// Loads and provides access to the rate schedule.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/attendant_care/
/// ├── schedule.yaml       # Schedule metadata
/// ├── tiers.yaml          # Care tier names and descriptions
/// └── rates/
///     └── 2010-09-01.yaml # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use attendant_care_engine::config::ConfigLoader;
/// use attendant_care_engine::models::CareTier;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/attendant_care").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let rate = loader.get_hourly_rate(CareTier::Level1, date).unwrap();
/// println!("Level 1 hourly rate: ${}", rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing or contains invalid
    /// YAML, if a tier has no definition, or if any rate or conversion
    /// factor is not strictly positive.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule_path = path.join("schedule.yaml");
        let metadata = Self::load_yaml::<ScheduleMetadata>(&schedule_path)?;

        let tiers_path = path.join("tiers.yaml");
        let tiers_config = Self::load_yaml::<TiersConfig>(&tiers_path)?;
        for tier in CareTier::ALL {
            if !tiers_config.tiers.contains_key(tier.rate_key()) {
                return Err(EngineError::ConfigParseError {
                    path: tiers_path.display().to_string(),
                    message: format!("missing definition for {}", tier),
                });
            }
        }

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        debug!(
            schedule = %metadata.code,
            version = %metadata.version,
            rate_files = rates.len(),
            "Loaded rate schedule"
        );

        let config = ScheduleConfig::new(metadata, tiers_config.tiers, rates);
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_config = Self::load_yaml::<RateConfig>(&path)?;
                Self::validate_rates(&rate_config)?;
                debug!(
                    file = %path.display(),
                    effective_date = %rate_config.effective_date,
                    "Loaded rate file"
                );
                rates.push(rate_config);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    fn validate_rates(rate_config: &RateConfig) -> EngineResult<()> {
        for tier in CareTier::ALL {
            let rate = rate_config.hourly.get(tier);
            if rate <= Decimal::ZERO {
                return Err(EngineError::InvalidRate {
                    tier: tier.to_string(),
                    message: format!(
                        "hourly rate {} effective {} must be greater than zero",
                        rate, rate_config.effective_date
                    ),
                });
            }
        }

        if rate_config.weekly_to_monthly <= Decimal::ZERO {
            return Err(EngineError::InvalidRate {
                tier: "weekly_to_monthly".to_string(),
                message: format!(
                    "conversion factor {} effective {} must be greater than zero",
                    rate_config.weekly_to_monthly, rate_config.effective_date
                ),
            });
        }

        Ok(())
    }

    /// Returns the underlying schedule configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.config.metadata()
    }

    /// Returns the display definition of a tier.
    pub fn get_tier(&self, tier: CareTier) -> Option<&TierDefinition> {
        self.config.tiers().get(tier.rate_key())
    }

    /// Returns the rate file in force on `date`.
    ///
    /// The most recent rate file effective on or before the date is used.
    pub fn rates_for(&self, date: NaiveDate) -> EngineResult<&RateConfig> {
        self.config
            .rates_on(date)
            .ok_or(EngineError::ScheduleNotInForce { date })
    }

    /// Returns the most recent rate file.
    pub fn latest_rates(&self) -> EngineResult<&RateConfig> {
        self.config
            .rates()
            .last()
            .ok_or_else(|| EngineError::ConfigNotFound {
                path: "rates (no rate files found)".to_string(),
            })
    }

    /// Returns the calculation constants in force on `date`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendant_care_engine::calculation::calculate_summary;
    /// use attendant_care_engine::config::ConfigLoader;
    /// use attendant_care_engine::models::FormData;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/attendant_care")?;
    /// let config = loader.get_cost_config(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())?;
    /// let summary = calculate_summary(&FormData::default(), None, &config);
    /// assert!(summary.is_zero());
    /// # Ok::<(), attendant_care_engine::error::EngineError>(())
    /// ```
    pub fn get_cost_config(&self, date: NaiveDate) -> EngineResult<CostConfig> {
        self.rates_for(date).map(RateConfig::cost_config)
    }

    /// Returns the hourly rate for `tier` on `date`.
    pub fn get_hourly_rate(&self, tier: CareTier, date: NaiveDate) -> EngineResult<Decimal> {
        self.rates_for(date).map(|rc| rc.hourly.get(tier))
    }
}
