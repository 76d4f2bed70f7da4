//! Calculation result models for the Attendant Care Cost Engine.
//!
//! This module contains the [`CalculationResult`] type returned by the HTTP
//! API, which wraps a [`Summary`] with identifying metadata and an audit
//! trace explaining how each figure was reached.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CareTier, Summary};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of
/// the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The care tier this step concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<CareTier>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag input the engine tolerated silently, such as malformed
/// entries that were skipped, but that a reviewer may want to correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use attendant_care_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a cost calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Effective date of the rate schedule used.
    pub effective_date: NaiveDate,
    /// The computed hours and costs.
    pub summary: Summary,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_omits_missing_tier() {
        let step = AuditStep {
            step_number: 4,
            rule_id: "summary_totals".to_string(),
            rule_name: "Summary Totals".to_string(),
            tier: None,
            input: serde_json::json!({}),
            output: serde_json::json!({}),
            reasoning: "totals".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("tier"));
        assert!(json.contains("\"rule_id\":\"summary_totals\""));
    }

    #[test]
    fn test_audit_step_serializes_tier_by_rate_key() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "tier_cost".to_string(),
            rule_name: "Tier Cost".to_string(),
            tier: Some(CareTier::Level1),
            input: serde_json::json!({}),
            output: serde_json::json!({}),
            reasoning: String::new(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"tier\":\"LEVEL_1\""));
    }

    #[test]
    fn test_calculation_result_round_trip() {
        let result = CalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2010, 9, 1).unwrap(),
            summary: Summary::default(),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning {
                    code: "MALFORMED_ENTRY".to_string(),
                    message: "skipped".to_string(),
                    severity: "low".to_string(),
                }],
                duration_us: 12,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
