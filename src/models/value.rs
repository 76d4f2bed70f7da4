//! Lenient numeric coercion for loosely-typed form values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// Coerces a JSON value into a decimal.
///
/// Numbers and numeric strings (surrounding whitespace allowed, scientific
/// notation accepted) yield `Some`. Everything else, including `null`,
/// booleans, empty strings, objects and arrays, yields `None`.
///
/// A string must be numeric as a whole. Trailing garbage is rejected rather
/// than parsed as a numeric prefix, so `"45abc"` yields `None`, not 45.
pub(crate) fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => number_to_decimal(number),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }
    // Floats go through their shortest round-trip representation so that
    // 157.5 becomes exactly 157.5 rather than its binary approximation.
    parse_decimal(&number.to_string())
}

pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
