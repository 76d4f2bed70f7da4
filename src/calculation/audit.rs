//! Audit trace for a cost summary.
//!
//! Explains each tier's figures as a step in the calculation and raises
//! warnings for input the engine tolerated silently.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::CostConfig;
use crate::models::{
    ActivityEntry, AuditStep, AuditTrace, AuditWarning, CareTier, CategoryEntry, CustomRates,
    FormData, Summary, TierActivities,
};

use super::monthly_cost::{RateSource, resolve_hourly_rate};
use super::summary::{calculate_summary, effective_custom_rates};

/// A summary together with the trace explaining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditedSummary {
    /// The computed figures, identical to [`calculate_summary`].
    pub summary: Summary,
    /// One step per tier and a totals step, plus any warnings.
    pub audit_trace: AuditTrace,
}

/// Counts of what was found while walking one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TierInspection {
    categories: usize,
    records: usize,
    malformed: usize,
    missing_totals: usize,
    negative_totals: usize,
}

impl TierInspection {
    fn of(activities: Option<&TierActivities>) -> Self {
        let mut inspection = Self::default();
        match activities {
            None => {}
            Some(TierActivities::Malformed(value)) => inspection.count_malformed(value),
            Some(TierActivities::Categories(categories)) => {
                for category in categories.values() {
                    inspection.categories += 1;
                    inspection.inspect_category(category);
                }
            }
        }
        inspection
    }

    // Null is an unfilled branch, not a malformed one.
    fn count_malformed(&mut self, value: &Value) {
        if !value.is_null() {
            self.malformed += 1;
        }
    }

    fn inspect_category(&mut self, category: &CategoryEntry) {
        let entries = match category {
            CategoryEntry::Activities(entries) => entries,
            CategoryEntry::Malformed(value) => {
                self.count_malformed(value);
                return;
            }
        };
        for entry in entries.values() {
            match entry {
                ActivityEntry::Malformed(value) => self.count_malformed(value),
                ActivityEntry::Record(record) => {
                    self.records += 1;
                    match record.total_minutes {
                        None => self.missing_totals += 1,
                        Some(total) if total < Decimal::ZERO => self.negative_totals += 1,
                        Some(_) => {}
                    }
                }
            }
        }
    }
}

/// Calculates the summary for a form and records how each figure was reached.
///
/// # Examples
///
/// ```
/// use attendant_care_engine::calculation::calculate_audited_summary;
/// use attendant_care_engine::config::CostConfig;
/// use attendant_care_engine::models::FormData;
/// use serde_json::json;
///
/// let form = FormData::from(json!({
///     "level1": { "cat": { "a": { "totalMinutes": 180 } } },
/// }));
///
/// let audited = calculate_audited_summary(&form, None, &CostConfig::default());
/// assert_eq!(audited.audit_trace.steps.len(), 4);
/// assert!(audited.audit_trace.steps[0].reasoning.contains("$192.21"));
/// ```
pub fn calculate_audited_summary(
    form: &FormData,
    custom_rates: Option<&CustomRates>,
    config: &CostConfig,
) -> AuditedSummary {
    let summary = calculate_summary(form, custom_rates, config);
    let rates = effective_custom_rates(form, custom_rates);
    let rates = rates.as_deref();

    let mut steps = Vec::with_capacity(CareTier::ALL.len() + 1);
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    for tier in CareTier::ALL {
        let inspection = TierInspection::of(form.tier(tier));
        let figures = summary.tier(tier);
        let resolved = resolve_hourly_rate(tier, rates, config);
        let source = match resolved.source {
            RateSource::Custom => "custom",
            RateSource::Framework => "framework",
        };

        steps.push(AuditStep {
            step_number,
            rule_id: "tier_cost".to_string(),
            rule_name: "Tier Cost".to_string(),
            tier: Some(tier),
            input: serde_json::json!({
                "categories": inspection.categories,
                "records": inspection.records,
                "minutes_per_week": figures.minutes_per_week.to_string(),
            }),
            output: serde_json::json!({
                "weekly_hours": figures.weekly_hours.to_string(),
                "monthly_hours": figures.monthly_hours.to_string(),
                "hourly_rate": resolved.rate.to_string(),
                "rate_source": source,
                "monthly_cost": figures.monthly_cost.to_string(),
            }),
            reasoning: format!(
                "{} min/wk / 60 = {} h/wk x {} = {} h/mo x ${} ({}) = ${}",
                figures.minutes_per_week.normalize(),
                figures.weekly_hours.normalize(),
                config.weekly_to_monthly.normalize(),
                figures.monthly_hours.normalize(),
                resolved.rate,
                source,
                figures.monthly_cost,
            ),
        });
        step_number += 1;

        collect_warnings(tier, &inspection, rates, &mut warnings);
    }

    let totals = &summary.summary;
    steps.push(AuditStep {
        step_number,
        rule_id: "summary_totals".to_string(),
        rule_name: "Summary Totals".to_string(),
        tier: None,
        input: serde_json::json!({
            "monthly_hours": CareTier::ALL
                .iter()
                .map(|tier| summary.tier(*tier).monthly_hours.to_string())
                .collect::<Vec<_>>(),
            "monthly_costs": CareTier::ALL
                .iter()
                .map(|tier| summary.tier(*tier).monthly_cost.to_string())
                .collect::<Vec<_>>(),
        }),
        output: serde_json::json!({
            "total_monthly_hours": totals.total_monthly_hours.to_string(),
            "total_monthly_cost": totals.total_monthly_cost.to_string(),
            "annual_cost": totals.annual_cost.to_string(),
        }),
        reasoning: format!(
            "{} h/mo, ${}/mo x 12 = ${}/yr",
            totals.total_monthly_hours.normalize(),
            totals.total_monthly_cost,
            totals.annual_cost,
        ),
    });

    AuditedSummary {
        summary,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: 0,
        },
    }
}

fn collect_warnings(
    tier: CareTier,
    inspection: &TierInspection,
    rates: Option<&CustomRates>,
    warnings: &mut Vec<AuditWarning>,
) {
    if inspection.malformed > 0 {
        warnings.push(AuditWarning {
            code: "MALFORMED_ENTRY".to_string(),
            message: format!(
                "Skipped {} malformed entr{} in {}",
                inspection.malformed,
                if inspection.malformed == 1 { "y" } else { "ies" },
                tier
            ),
            severity: "low".to_string(),
        });
    }

    if inspection.missing_totals > 0 {
        warnings.push(AuditWarning {
            code: "MISSING_TOTAL_MINUTES".to_string(),
            message: format!(
                "{} activit{} in {} had no usable totalMinutes and counted as zero",
                inspection.missing_totals,
                if inspection.missing_totals == 1 { "y" } else { "ies" },
                tier
            ),
            severity: "low".to_string(),
        });
    }

    if inspection.negative_totals > 0 {
        warnings.push(AuditWarning {
            code: "NEGATIVE_TOTAL_MINUTES".to_string(),
            message: format!(
                "{} activit{} in {} had negative totalMinutes",
                inspection.negative_totals,
                if inspection.negative_totals == 1 { "y" } else { "ies" },
                tier
            ),
            severity: "high".to_string(),
        });
    }

    if rates.and_then(|r| r.get(tier)).is_some_and(|rate| rate.is_zero()) {
        warnings.push(AuditWarning {
            code: "ZERO_CUSTOM_RATE".to_string(),
            message: format!(
                "Custom rate of 0 for {} was ignored; the framework rate was used",
                tier
            ),
            severity: "medium".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audit(form: Value) -> AuditedSummary {
        calculate_audited_summary(&FormData::from(form), None, &CostConfig::default())
    }

    fn warning_codes(audited: &AuditedSummary) -> Vec<&str> {
        audited
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect()
    }

    #[test]
    fn test_summary_matches_plain_calculation() {
        let form = FormData::from(json!({
            "level1": { "cat": { "a": { "totalMinutes": 60 }, "b": { "totalMinutes": 120 } } },
            "level3": { "cat": { "a": { "totalMinutes": 95 } } },
        }));
        let config = CostConfig::default();

        let audited = calculate_audited_summary(&form, None, &config);
        assert_eq!(audited.summary, calculate_summary(&form, None, &config));
    }

    #[test]
    fn test_one_step_per_tier_then_totals() {
        let audited = audit(json!({}));
        let steps = &audited.audit_trace.steps;

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].tier, Some(CareTier::Level1));
        assert_eq!(steps[1].tier, Some(CareTier::Level2));
        assert_eq!(steps[2].tier, Some(CareTier::Level3));
        assert_eq!(steps[3].rule_id, "summary_totals");
        assert_eq!(
            steps.iter().map(|s| s.step_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(audited.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_tier_step_explains_figures() {
        let audited = audit(json!({
            "level1": { "cat": { "a": { "totalMinutes": 60 }, "b": { "totalMinutes": 120 } } },
        }));
        let step = &audited.audit_trace.steps[0];

        assert_eq!(step.input["records"], 2);
        assert_eq!(step.input["minutes_per_week"], "180");
        assert_eq!(step.output["monthly_hours"], "12.9");
        assert_eq!(step.output["hourly_rate"], "14.90");
        assert_eq!(step.output["rate_source"], "framework");
        assert_eq!(
            step.reasoning,
            "180 min/wk / 60 = 3 h/wk x 4.3 = 12.9 h/mo x $14.90 (framework) = $192.21"
        );
    }

    #[test]
    fn test_totals_step_explains_annual_cost() {
        let audited = audit(json!({
            "level1": { "cat": { "a": { "totalMinutes": 180 } } },
        }));
        let step = &audited.audit_trace.steps[3];

        assert_eq!(step.output["annual_cost"], "2306.52");
        assert_eq!(step.reasoning, "12.9 h/mo, $192.21/mo x 12 = $2306.52/yr");
    }

    #[test]
    fn test_custom_rate_source_is_recorded() {
        let audited = audit(json!({
            "level2": { "cat": { "a": { "totalMinutes": 120 } } },
            "customRates": { "LEVEL_2": 18 },
        }));
        let step = &audited.audit_trace.steps[1];

        assert_eq!(step.output["rate_source"], "custom");
        assert_eq!(step.output["hourly_rate"], "18");
    }

    #[test]
    fn test_malformed_and_missing_entries_warn() {
        let audited = audit(json!({
            "level1": {
                "cat": { "a": 5, "b": { "minutes": 10 }, "c": { "totalMinutes": 30 }, "d": null },
                "broken": "x",
            },
        }));

        assert_eq!(
            warning_codes(&audited),
            vec!["MALFORMED_ENTRY", "MISSING_TOTAL_MINUTES"]
        );
        assert_eq!(
            audited.audit_trace.warnings[0].message,
            "Skipped 2 malformed entries in LEVEL_1"
        );
    }

    #[test]
    fn test_null_branches_do_not_warn() {
        let audited = audit(json!({
            "level1": { "cat": { "a": null }, "other": null },
            "level2": null,
        }));
        assert!(audited.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_negative_totals_warn() {
        let audited = audit(json!({
            "level3": { "cat": { "a": { "totalMinutes": -30 } } },
        }));
        assert_eq!(warning_codes(&audited), vec!["NEGATIVE_TOTAL_MINUTES"]);
        assert_eq!(audited.audit_trace.warnings[0].severity, "high");
    }

    #[test]
    fn test_zero_custom_rate_warns() {
        let audited = audit(json!({
            "level1": { "cat": { "a": { "totalMinutes": 120 } } },
            "customRates": { "LEVEL_1": 0 },
        }));

        assert_eq!(warning_codes(&audited), vec!["ZERO_CUSTOM_RATE"]);
        assert_eq!(audited.audit_trace.steps[0].output["rate_source"], "framework");
    }
}
