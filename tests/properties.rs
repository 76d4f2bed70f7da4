//! Property tests for the cost calculation.

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value, json};

use attendant_care_engine::calculation::{
    calculate_audited_summary, calculate_summary, calculate_total_cost_for_category,
    calculate_total_minutes, calculate_weekly_hours, refresh_total_minutes,
};
use attendant_care_engine::config::CostConfig;
use attendant_care_engine::models::{CareTier, CategoryEntry, CustomRates, FormData};

fn tier_value(minutes: &[u32]) -> Value {
    let activities: Map<String, Value> = minutes
        .iter()
        .enumerate()
        .map(|(i, m)| (format!("activity_{}", i), json!({ "totalMinutes": m })))
        .collect();
    json!({ "category": activities })
}

fn form(level1: &[u32], level2: &[u32], level3: &[u32]) -> FormData {
    FormData::from(json!({
        "level1": tier_value(level1),
        "level2": tier_value(level2),
        "level3": tier_value(level3),
    }))
}

fn minutes_list() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..2_000, 0..8)
}

/// Non-negative decimals with up to two decimal places.
fn non_negative_decimal() -> impl Strategy<Value = Decimal> {
    (0i64..100_000, 0u32..3).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn care_tier() -> impl Strategy<Value = CareTier> {
    prop::sample::select(CareTier::ALL.to_vec())
}

/// Keys that reach into the form structure, plus arbitrary ones.
fn form_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "level1",
            "level2",
            "level3",
            "minutes",
            "timesPerWeek",
            "totalMinutes",
            "customRates",
            "summary",
            "LEVEL_1",
        ])
        .prop_map(String::from),
        "[a-z]{1,6}",
    ]
}

fn json_tree(leaf: BoxedStrategy<Value>) -> impl Strategy<Value = Value> {
    leaf.prop_recursive(5, 96, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(form_key(), inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// JSON with no numbers and no numeric strings anywhere.
fn non_numeric_json() -> impl Strategy<Value = Value> {
    json_tree(
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            "[a-z ]{0,8}".prop_map(Value::String),
        ]
        .boxed(),
    )
}

/// JSON whose leaves include extreme numbers and numeric strings.
fn extreme_json() -> impl Strategy<Value = Value> {
    json_tree(
        prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            prop::sample::select(vec![
                "1e-400",
                "9e99999999999",
                "NaN",
                "-0",
                "79228162514264337593543950335",
                "-79228162514264337593543950335",
                "0.0000000000000000000000000001",
            ])
            .prop_map(|text| Value::String(text.to_string())),
        ]
        .boxed(),
    )
}

proptest! {
    #[test]
    fn totals_are_sums_of_tiers(l1 in minutes_list(), l2 in minutes_list(), l3 in minutes_list()) {
        let summary = calculate_summary(&form(&l1, &l2, &l3), None, &CostConfig::default());
        let tiers = [summary.level1, summary.level2, summary.level3];

        let hours: Decimal = tiers.iter().map(|t| t.monthly_hours).sum();
        let cost: Decimal = tiers.iter().map(|t| t.monthly_cost).sum();

        prop_assert_eq!(summary.summary.total_monthly_hours, hours);
        prop_assert_eq!(summary.summary.total_monthly_cost, cost);
        prop_assert_eq!(summary.summary.annual_cost, cost * Decimal::from(12));
    }

    #[test]
    fn outputs_have_at_most_two_decimal_places(l1 in minutes_list(), l3 in minutes_list()) {
        let summary = calculate_summary(&form(&l1, &[], &l3), None, &CostConfig::default());
        for tier in CareTier::ALL {
            let figures = summary.tier(tier);
            prop_assert!(figures.weekly_hours.scale() <= 2);
            prop_assert!(figures.monthly_hours.scale() <= 2);
            prop_assert!(figures.monthly_cost.scale() <= 2);
        }
    }

    #[test]
    fn minutes_per_week_is_the_raw_sum(l2 in minutes_list()) {
        let summary = calculate_summary(&form(&[], &l2, &[]), None, &CostConfig::default());
        let expected: u32 = l2.iter().sum();
        prop_assert_eq!(summary.level2.minutes_per_week, Decimal::from(expected));
    }

    #[test]
    fn more_minutes_never_cost_less(base in minutes_list(), extra in 0u32..2_000) {
        let config = CostConfig::default();
        let before = calculate_summary(&form(&base, &[], &[]), None, &config);

        let mut more = base.clone();
        more.push(extra);
        let after = calculate_summary(&form(&more, &[], &[]), None, &config);

        prop_assert!(after.level1.monthly_cost >= before.level1.monthly_cost);
    }

    #[test]
    fn zero_custom_rate_matches_no_override(l1 in minutes_list()) {
        let config = CostConfig::default();
        let form = form(&l1, &[], &[]);
        let zero = CustomRates::new().with_rate(CareTier::Level1, Decimal::ZERO);

        prop_assert_eq!(
            calculate_summary(&form, Some(&zero), &config),
            calculate_summary(&form, None, &config)
        );
    }

    #[test]
    fn total_minutes_rounds_the_product(minutes in non_negative_decimal(), times in non_negative_decimal()) {
        let total = calculate_total_minutes(Some(minutes), Some(times));
        let expected = (minutes * times).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        prop_assert_eq!(total, expected);
        prop_assert_eq!(total, total.trunc());
    }

    #[test]
    fn split_category_costs_the_same_as_combined(minutes in minutes_list(), tier in care_tier()) {
        let config = CostConfig::default();
        let split = calculate_total_cost_for_category(
            &CategoryEntry::from(tier_value(&minutes)["category"].clone()),
            tier,
            None,
            &config,
        );

        let total: u32 = minutes.iter().sum();
        let combined = calculate_total_cost_for_category(
            &CategoryEntry::from(json!({ "all": { "totalMinutes": total } })),
            tier,
            None,
            &config,
        );

        prop_assert_eq!(split, combined);
    }

    #[test]
    fn summary_is_idempotent(l1 in minutes_list(), l2 in minutes_list(), l3 in minutes_list()) {
        let config = CostConfig::default();
        let form = form(&l1, &l2, &l3);
        let first = calculate_summary(&form, None, &config);

        prop_assert_eq!(first, calculate_summary(&form, None, &config));

        let reparsed: FormData = serde_json::from_value(serde_json::to_value(&form).unwrap()).unwrap();
        prop_assert_eq!(first, calculate_summary(&reparsed, None, &config));
    }

    #[test]
    fn forms_without_numbers_cost_nothing(value in non_numeric_json()) {
        let mut form = FormData::from(value);
        let config = CostConfig::default();

        prop_assert!(calculate_summary(&form, None, &config).is_zero());
        prop_assert!(calculate_audited_summary(&form, None, &config).summary.is_zero());

        refresh_total_minutes(&mut form);
        prop_assert!(calculate_summary(&form, None, &config).is_zero());
    }

    #[test]
    fn extreme_values_never_panic(value in extreme_json()) {
        let mut form = FormData::from(value);
        let config = CostConfig::default();

        let summary = calculate_summary(&form, None, &config);
        prop_assert_eq!(calculate_audited_summary(&form, None, &config).summary, summary);

        refresh_total_minutes(&mut form);
        let _ = calculate_summary(&form, None, &config);
    }

    #[test]
    fn weekly_hours_is_minutes_over_sixty(minutes in 0u32..100_000) {
        let hours = calculate_weekly_hours(Decimal::from(minutes));
        let exact = Decimal::from(minutes) / Decimal::from(60);
        prop_assert!((hours - exact).abs() <= Decimal::new(5, 3));
    }
}
