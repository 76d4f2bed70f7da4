//! Attendant care form data.
//!
//! The form layer hands the engine a loosely-typed tree:
//!
//! ```text
//! {
//!   "level1": { "<category>": { "<activity>": { "minutes": 30, "timesPerWeek": 7, "totalMinutes": 210 } } },
//!   "level2": { ... },
//!   "level3": { ... },
//!   "customRates": { "LEVEL_1": 20 },
//!   "summary": { "customRates": { ... } }
//! }
//! ```
//!
//! Every branch may be missing or hold the wrong shape while a user is
//! part way through editing. The types here model each level of the tree as
//! a sum of "well-formed" and "malformed", and converting from a JSON value
//! is total. Malformed branches keep their raw value so that round-tripping
//! a form never drops data.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::care_tier::{CareTier, CustomRates};
use super::value::coerce_decimal;

/// One trackable attendant care task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Minutes spent per occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<Decimal>,
    /// Occurrences per week.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times_per_week: Option<Decimal>,
    /// Minutes per week, derived from the two fields above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<Decimal>,
    /// Free-text notes. Not used in calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Any other fields the form stored on the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityRecord {
    /// Creates a record from minutes per occurrence and occurrences per week.
    ///
    /// The total is left unset; see
    /// [`refresh_total_minutes`](crate::calculation::refresh_total_minutes).
    pub fn new(minutes: Decimal, times_per_week: Decimal) -> Self {
        Self {
            minutes: Some(minutes),
            times_per_week: Some(times_per_week),
            ..Self::default()
        }
    }

    /// Creates a record carrying only a weekly total.
    pub fn with_total_minutes(total_minutes: Decimal) -> Self {
        Self {
            total_minutes: Some(total_minutes),
            ..Self::default()
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let minutes = map.remove("minutes").and_then(|v| coerce_decimal(&v));
        let times_per_week = map.remove("timesPerWeek").and_then(|v| coerce_decimal(&v));
        let total_minutes = map.remove("totalMinutes").and_then(|v| coerce_decimal(&v));
        let notes = match map.remove("notes") {
            Some(Value::String(text)) => Some(text),
            Some(other) if !other.is_null() => {
                // Keep unexpected note shapes rather than dropping them.
                map.insert("notes".to_string(), other);
                None
            }
            _ => None,
        };

        Self {
            minutes,
            times_per_week,
            total_minutes,
            notes,
            extra: map,
        }
    }
}

/// An entry in a category: a record, or something that is not one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActivityEntry {
    /// A well-formed activity record.
    Record(ActivityRecord),
    /// Any non-object value. Contributes nothing.
    Malformed(Value),
}

impl ActivityEntry {
    /// Returns the record if this entry is well-formed.
    pub fn as_record(&self) -> Option<&ActivityRecord> {
        match self {
            ActivityEntry::Record(record) => Some(record),
            ActivityEntry::Malformed(_) => None,
        }
    }

    /// Returns the record mutably if this entry is well-formed.
    pub fn as_record_mut(&mut self) -> Option<&mut ActivityRecord> {
        match self {
            ActivityEntry::Record(record) => Some(record),
            ActivityEntry::Malformed(_) => None,
        }
    }
}

impl From<Value> for ActivityEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ActivityEntry::Record(ActivityRecord::from_map(map)),
            other => ActivityEntry::Malformed(other),
        }
    }
}

impl From<ActivityRecord> for ActivityEntry {
    fn from(record: ActivityRecord) -> Self {
        ActivityEntry::Record(record)
    }
}

impl<'de> Deserialize<'de> for ActivityEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// A category of activities keyed by activity id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    /// A well-formed mapping of activity id to entry.
    Activities(BTreeMap<String, ActivityEntry>),
    /// Any non-object value. Contributes nothing.
    Malformed(Value),
}

impl CategoryEntry {
    /// Iterates over the well-formed records in this category.
    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.activities()
            .into_iter()
            .flat_map(|map| map.values())
            .filter_map(ActivityEntry::as_record)
    }

    /// Iterates mutably over the well-formed records in this category.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut ActivityRecord> {
        let map = match self {
            CategoryEntry::Activities(map) => Some(map),
            CategoryEntry::Malformed(_) => None,
        };
        map.into_iter()
            .flat_map(|map| map.values_mut())
            .filter_map(ActivityEntry::as_record_mut)
    }

    /// Returns the activity map if this category is well-formed.
    pub fn activities(&self) -> Option<&BTreeMap<String, ActivityEntry>> {
        match self {
            CategoryEntry::Activities(map) => Some(map),
            CategoryEntry::Malformed(_) => None,
        }
    }
}

impl From<Value> for CategoryEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CategoryEntry::Activities(
                map.into_iter()
                    .map(|(id, entry)| (id, ActivityEntry::from(entry)))
                    .collect(),
            ),
            other => CategoryEntry::Malformed(other),
        }
    }
}

impl FromIterator<(String, ActivityRecord)> for CategoryEntry {
    fn from_iter<I: IntoIterator<Item = (String, ActivityRecord)>>(iter: I) -> Self {
        CategoryEntry::Activities(
            iter.into_iter()
                .map(|(id, record)| (id, ActivityEntry::Record(record)))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for CategoryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// The categories recorded under one care tier, keyed by category id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TierActivities {
    /// A well-formed mapping of category id to category.
    Categories(BTreeMap<String, CategoryEntry>),
    /// Any non-object value. Contributes nothing.
    Malformed(Value),
}

impl TierActivities {
    /// Iterates over the categories of this tier.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryEntry> {
        let map = match self {
            TierActivities::Categories(map) => Some(map),
            TierActivities::Malformed(_) => None,
        };
        map.into_iter().flat_map(|map| map.values())
    }

    /// Iterates mutably over the categories of this tier.
    pub fn categories_mut(&mut self) -> impl Iterator<Item = &mut CategoryEntry> {
        let map = match self {
            TierActivities::Categories(map) => Some(map),
            TierActivities::Malformed(_) => None,
        };
        map.into_iter().flat_map(|map| map.values_mut())
    }

    /// Iterates over every well-formed record in every category of this tier.
    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.categories().flat_map(|category| category.records())
    }
}

impl From<Value> for TierActivities {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => TierActivities::Categories(
                map.into_iter()
                    .map(|(id, category)| (id, CategoryEntry::from(category)))
                    .collect(),
            ),
            other => TierActivities::Malformed(other),
        }
    }
}

impl FromIterator<(String, CategoryEntry)> for TierActivities {
    fn from_iter<I: IntoIterator<Item = (String, CategoryEntry)>>(iter: I) -> Self {
        TierActivities::Categories(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for TierActivities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// The attendant care portion of an assessment form.
///
/// # Example
///
/// ```
/// use attendant_care_engine::models::{CareTier, FormData};
/// use serde_json::json;
///
/// let form = FormData::from(json!({
///     "level1": { "grooming": { "hair": { "totalMinutes": 60 } } },
///     "level2": null,
/// }));
///
/// assert_eq!(form.tier(CareTier::Level1).unwrap().records().count(), 1);
/// assert_eq!(form.tier(CareTier::Level2).unwrap().records().count(), 0);
/// assert!(form.tier(CareTier::Level3).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    /// Level 1 activities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level1: Option<TierActivities>,
    /// Level 2 activities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level2: Option<TierActivities>,
    /// Level 3 activities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level3: Option<TierActivities>,
    /// Rate overrides stored at the top level of the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_rates: Option<CustomRates>,
    /// Every other top-level field, including the `summary` section.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormData {
    /// Returns the activities recorded for `tier`, if the form has that level.
    pub fn tier(&self, tier: CareTier) -> Option<&TierActivities> {
        match tier {
            CareTier::Level1 => self.level1.as_ref(),
            CareTier::Level2 => self.level2.as_ref(),
            CareTier::Level3 => self.level3.as_ref(),
        }
    }

    /// Returns the activities recorded for `tier` mutably.
    pub fn tier_mut(&mut self, tier: CareTier) -> Option<&mut TierActivities> {
        match tier {
            CareTier::Level1 => self.level1.as_mut(),
            CareTier::Level2 => self.level2.as_mut(),
            CareTier::Level3 => self.level3.as_mut(),
        }
    }

    /// Sets the activities for `tier`.
    pub fn set_tier(&mut self, tier: CareTier, activities: TierActivities) {
        let slot = match tier {
            CareTier::Level1 => &mut self.level1,
            CareTier::Level2 => &mut self.level2,
            CareTier::Level3 => &mut self.level3,
        };
        *slot = Some(activities);
    }

    /// Returns true if the form has a top-level `customRates` that is neither
    /// null nor an override table.
    pub fn has_unusable_custom_rates(&self) -> bool {
        self.extra
            .get("customRates")
            .is_some_and(|value| !value.is_null())
    }

    /// Rate overrides stored under `summary.customRates`, if present.
    pub fn summary_custom_rates(&self) -> Option<CustomRates> {
        self.extra
            .get("summary")
            .and_then(|summary| summary.get("customRates"))
            .and_then(CustomRates::from_value)
    }
}

impl From<Value> for FormData {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let level1 = map.remove("level1").map(TierActivities::from);
        let level2 = map.remove("level2").map(TierActivities::from);
        let level3 = map.remove("level3").map(TierActivities::from);

        // Only an object counts as supplied overrides; anything else stays
        // with the other fields untouched.
        let custom_rates = map.get("customRates").and_then(CustomRates::from_value);
        if custom_rates.is_some() {
            map.remove("customRates");
        }

        Self {
            level1,
            level2,
            level3,
            custom_rates,
            extra: map,
        }
    }
}

impl<'de> Deserialize<'de> for FormData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}
