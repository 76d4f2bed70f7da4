//! Care tiers and per-call custom rate overrides.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::value::coerce_decimal;

/// One of the three levels of attendant care.
///
/// Rate tables key tiers by their `LEVEL_n` name, while form data keys
/// them as `leveln`.
///
/// # Example
///
/// ```
/// use attendant_care_engine::models::CareTier;
///
/// assert_eq!(CareTier::Level1.rate_key(), "LEVEL_1");
/// assert_eq!(CareTier::Level1.form_key(), "level1");
/// assert_eq!(CareTier::from_rate_key("LEVEL_3"), Some(CareTier::Level3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CareTier {
    /// Level 1: routine personal care.
    #[serde(rename = "LEVEL_1")]
    Level1,
    /// Level 2: basic supervisory functions.
    #[serde(rename = "LEVEL_2")]
    Level2,
    /// Level 3: complex health care and hygiene functions.
    #[serde(rename = "LEVEL_3")]
    Level3,
}

impl CareTier {
    /// All tiers in level order.
    pub const ALL: [CareTier; 3] = [CareTier::Level1, CareTier::Level2, CareTier::Level3];

    /// The key used for this tier in rate tables.
    pub fn rate_key(self) -> &'static str {
        match self {
            CareTier::Level1 => "LEVEL_1",
            CareTier::Level2 => "LEVEL_2",
            CareTier::Level3 => "LEVEL_3",
        }
    }

    /// The key used for this tier in form data.
    pub fn form_key(self) -> &'static str {
        match self {
            CareTier::Level1 => "level1",
            CareTier::Level2 => "level2",
            CareTier::Level3 => "level3",
        }
    }

    /// Looks up a tier by its rate table key.
    pub fn from_rate_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.rate_key() == key)
    }
}

impl fmt::Display for CareTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rate_key())
    }
}

/// Caller-supplied hourly rates that replace the framework rate for one call.
///
/// Parsing is lenient: unknown tier names and values that are not numeric
/// are dropped. A rate of zero is kept here; whether it applies is decided
/// by [`resolve_hourly_rate`](crate::calculation::resolve_hourly_rate).
///
/// # Example
///
/// ```
/// use attendant_care_engine::models::{CareTier, CustomRates};
/// use rust_decimal::Decimal;
///
/// let rates = CustomRates::new().with_rate(CareTier::Level1, Decimal::from(20));
/// assert_eq!(rates.get(CareTier::Level1), Some(Decimal::from(20)));
/// assert_eq!(rates.get(CareTier::Level2), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomRates(BTreeMap<CareTier, Decimal>);

impl CustomRates {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the overrides with `rate` set for `tier`.
    pub fn with_rate(mut self, tier: CareTier, rate: Decimal) -> Self {
        self.0.insert(tier, rate);
        self
    }

    /// Sets the override for `tier`.
    pub fn set(&mut self, tier: CareTier, rate: Decimal) {
        self.0.insert(tier, rate);
    }

    /// Returns the override supplied for `tier`, if any.
    pub fn get(&self, tier: CareTier) -> Option<Decimal> {
        self.0.get(&tier).copied()
    }

    /// Returns true if no overrides were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the supplied overrides in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (CareTier, Decimal)> + '_ {
        self.0.iter().map(|(tier, rate)| (*tier, *rate))
    }

    /// Parses overrides from a JSON value.
    ///
    /// Returns `None` when the value is not an object, so callers can tell
    /// "no overrides given" apart from "an empty override table".
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let mut rates = Self::new();
        for (key, raw) in map {
            if let (Some(tier), Some(rate)) = (CareTier::from_rate_key(key), coerce_decimal(raw)) {
                rates.set(tier, rate);
            }
        }
        Some(rates)
    }
}

impl<'de> Deserialize<'de> for CustomRates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value).unwrap_or_default())
    }
}
