//! Value inspection helpers shared by the rule evaluator, the compiler and the stores

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

static SQL_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// A string that is empty after trimming whitespace
pub fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

/// Present but carrying nothing: `null` or a blank string
pub fn is_empty_value(value: &Value) -> bool {
    value.is_null() || is_blank(value)
}

/// What `required` treats as missing: absent, null, blank or an empty array
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(value) => is_empty_value(value),
    }
}

/// Textual form of a scalar, as used for set membership and store lookups
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric reading of a JSON number or a numeric string
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Integral JSON numbers and strings that parse as `i64`
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

/// Email address check: `validator`'s grammar plus no embedded whitespace
pub fn is_valid_email(candidate: &str) -> bool {
    !candidate.chars().any(char::is_whitespace) && candidate.validate_email()
}

/// Plain SQL identifier (table or column name) safe to quote into a query
pub fn is_sql_identifier(name: &str) -> bool {
    SQL_IDENTIFIER.is_match(name)
}

/// Render a bound for messages: `255` rather than `255.0`, `0.1` as is
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
