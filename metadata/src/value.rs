//! # Bound Values
//!
//! Runtime values bound to property paths, and the coercion rules that
//! decide whether a value is acceptable for a semantic type.

use crate::descriptor::SemanticType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// A resolved runtime value: raw text or an already typed scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Duration(#[serde(with = "duration_millis")] Duration),
}

/// Bound path to value mapping. Ordered so reports and logs are stable.
pub type BoundValues = BTreeMap<String, BoundValue>;

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Text(text) => write!(f, "{}", text),
            BoundValue::Integer(n) => write!(f, "{}", n),
            BoundValue::Boolean(b) => write!(f, "{}", b),
            BoundValue::Duration(d) => write!(f, "{}ms", d.as_millis()),
        }
    }
}

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        BoundValue::Text(value.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(value: String) -> Self {
        BoundValue::Text(value)
    }
}

impl From<i64> for BoundValue {
    fn from(value: i64) -> Self {
        BoundValue::Integer(value)
    }
}

impl From<bool> for BoundValue {
    fn from(value: bool) -> Self {
        BoundValue::Boolean(value)
    }
}

impl From<Duration> for BoundValue {
    fn from(value: Duration) -> Self {
        BoundValue::Duration(value)
    }
}

/// Check whether `value` can be coerced to `semantic_type`.
///
/// `allowed_values` is only consulted for [`SemanticType::Enum`].
pub fn coerces_to(
    value: &BoundValue,
    semantic_type: SemanticType,
    allowed_values: &[String],
) -> bool {
    match (semantic_type, value) {
        (SemanticType::String, _) => true,
        (SemanticType::Path, BoundValue::Text(text)) => !text.contains('\0'),
        (SemanticType::Integer, BoundValue::Integer(_)) => true,
        (SemanticType::Integer, BoundValue::Text(text)) => is_integer_text(text),
        (SemanticType::Boolean, BoundValue::Boolean(_)) => true,
        (SemanticType::Boolean, BoundValue::Text(text)) => parse_bool(text).is_some(),
        (SemanticType::Duration, BoundValue::Duration(_)) => true,
        (SemanticType::Duration, BoundValue::Integer(n)) => *n >= 0,
        (SemanticType::Duration, BoundValue::Text(text)) => parse_duration(text).is_some(),
        (SemanticType::Enum, BoundValue::Text(text)) => allowed_values
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(text.trim())),
        _ => false,
    }
}

/// Text coercion used for declared defaults.
pub fn text_coerces_to(text: &str, semantic_type: SemanticType, allowed_values: &[String]) -> bool {
    coerces_to(&BoundValue::Text(text.to_string()), semantic_type, allowed_values)
}

/// Integer text covers every width the type registry maps to `integer`,
/// from `i128::MIN` up to `u128::MAX`.
fn is_integer_text(text: &str) -> bool {
    let text = text.trim();
    text.parse::<i128>().is_ok() || text.parse::<u128>().is_ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a duration such as `500ms`, `30s`, `5m`, `2h`, `1d`.
///
/// Bare digits are milliseconds.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(split);
    if digits.is_empty() {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let millis = match unit.trim() {
        "" | "ms" => Some(amount),
        "s" => amount.checked_mul(1_000),
        "m" => amount.checked_mul(60_000),
        "h" => amount.checked_mul(3_600_000),
        "d" => amount.checked_mul(86_400_000),
        _ => None,
    }?;

    Some(Duration::from_millis(millis))
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(value.as_millis())
    }
}
