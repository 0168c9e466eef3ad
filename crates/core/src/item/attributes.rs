//! Typed attribute values and the coercion rules that produce them.
//!
//! Raw info panel values are plain text. They are coerced in a fixed order:
//!
//! 1. `"Yes"` / `"No"` become booleans
//! 2. base-10 float literals become numbers
//! 3. anything else stays text

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label to value mapping for one item.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A coerced attribute value.
///
/// Serialized untagged, so JSON `true`, `1.5` and `"N/A"` map straight back
/// to `Bool`, `Number` and `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// Coerce a trimmed raw value into a typed attribute.
pub fn coerce(raw: &str) -> AttributeValue {
    if raw == "Yes" {
        return AttributeValue::Bool(true);
    }

    if raw == "No" {
        return AttributeValue::Bool(false);
    }

    if let Some(number) = parse_number(raw) {
        return AttributeValue::Number(number);
    }

    AttributeValue::Text(raw.to_string())
}

/// Parse a decimal float literal: optional sign, digits, optional fraction,
/// optional exponent.
///
/// `f64::from_str` also accepts `inf`/`nan` spellings; those are rejected here
/// along with anything that overflows to infinity, since JSON cannot carry them.
fn parse_number(raw: &str) -> Option<f64> {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value: f64 = raw.parse().ok()?;
    value.is_finite().then_some(value)
}
