//! Core data models for the Attendant Care Cost Engine.
//!
//! This module contains the form data tree the engine reads, the care tiers
//! and rate overrides, and the summary and audit types it produces.

mod calculation_result;
mod care_tier;
mod form_data;
mod summary;
mod value;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use care_tier::{CareTier, CustomRates};
pub use form_data::{ActivityEntry, ActivityRecord, CategoryEntry, FormData, TierActivities};
pub use summary::{CostTotals, Summary, TierSummary};
