//! Calculation logic for the Attendant Care Cost Engine.
//!
//! Each stage of the cost calculation lives in its own module: weekly
//! minutes per activity, hours conversion, hourly rate resolution and
//! monthly cost, per-category cost, the full three-tier summary, and the
//! audit trace that explains a summary. Every function here is pure and
//! infallible; unusable input contributes zero.

mod audit;
mod category_cost;
mod hours;
mod monthly_cost;
mod rounding;
mod summary;
mod total_minutes;

pub use audit::{AuditedSummary, calculate_audited_summary};
pub use category_cost::{calculate_total_cost_for_category, sum_category_minutes};
pub use hours::{MINUTES_PER_HOUR, calculate_monthly_hours, calculate_weekly_hours};
pub use monthly_cost::{RateSource, ResolvedRate, calculate_monthly_cost, resolve_hourly_rate};
pub use summary::{
    MONTHS_PER_YEAR, calculate_summary, calculate_tier_summary, effective_custom_rates,
    sum_tier_minutes,
};
pub use total_minutes::{calculate_total_minutes, refresh_total_minutes};
