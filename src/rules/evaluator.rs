//! Evaluate one rule atom against one field value

use serde_json::Value;

use crate::constants::CONFIRMATION_SUFFIX;
use crate::db::{ExistenceQuery, StoreError, StoreValue, UniquenessStore, is_unique};
use crate::engine::{BooleanPolicy, EngineOptions, LengthPolicy};
use crate::models::{Record, ValidationContext};
use crate::utils::validation::{
    as_number, is_integer, is_missing, is_valid_email, scalar_text,
};

use super::atom::{Except, ExistsRule, Outcome, RuleAtom, UniqueRule};

static NULL: Value = Value::Null;

/// Everything an atom may look at
pub struct Evaluation<'a> {
    pub field: &'a str,
    /// `None` when the key is absent from the record
    pub value: Option<&'a Value>,
    /// The whole record, for sibling lookups
    pub record: &'a Record,
    pub context: &'a ValidationContext,
    pub options: &'a EngineOptions,
}

/// Check one atom.
///
/// Only `unique` and `exists` touch the store; their store errors are
/// returned as errors, never as a failed atom.
pub async fn evaluate(
    atom: &RuleAtom,
    input: &Evaluation<'_>,
    store: &dyn UniquenessStore,
) -> Result<Outcome, StoreError> {
    let value = input.value.unwrap_or(&NULL);
    let options = input.options;

    let passed = match atom {
        RuleAtom::Required => !is_missing(input.value),
        RuleAtom::StringType => value.is_string(),
        RuleAtom::MaxLength(max) => {
            measure_length(value, options.length_policy).is_some_and(|n| n <= *max)
        }
        RuleAtom::MinLength(min) => {
            measure_length(value, options.length_policy).is_some_and(|n| n >= *min)
        }
        RuleAtom::Email => value.as_str().is_some_and(is_valid_email),
        RuleAtom::InSet(candidates) => {
            scalar_text(value).is_some_and(|text| candidates.iter().any(|c| *c == text))
        }
        RuleAtom::Boolean => is_boolean(value, options.boolean_policy),
        RuleAtom::Confirmed => {
            let sibling = format!("{}{}", input.field, CONFIRMATION_SUFFIX);
            input.record.get(&sibling) == Some(value)
        }
        RuleAtom::Numeric => as_number(value).is_some(),
        RuleAtom::Integer => is_integer(value),
        RuleAtom::Min(min) => numeric_size(value, options.length_policy).is_some_and(|n| n >= *min),
        RuleAtom::Max(max) => numeric_size(value, options.length_policy).is_some_and(|n| n <= *max),
        RuleAtom::Unique(rule) => check_unique(rule, value, input.context, store).await?,
        RuleAtom::Exists(rule) => check_exists(rule, value, store).await?,
        RuleAtom::AlphaNum => scalar_text(value)
            .filter(|_| value.is_string() || value.is_number())
            .is_some_and(|text| !text.is_empty() && text.chars().all(char::is_alphanumeric)),
        RuleAtom::Uppercase => value.as_str().is_some_and(|s| s.to_uppercase() == s),
    };

    Ok(if passed {
        Outcome::Pass
    } else {
        Outcome::Fail(atom.failure(input.field))
    })
}

/// Length of a value: characters for strings, elements for arrays
fn measure_length(value: &Value, policy: LengthPolicy) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Number(_) | Value::Bool(_) if policy == LengthPolicy::Stringify => {
            Some(value.to_string().chars().count())
        }
        _ => None,
    }
}

/// Numeric bounds compare numbers; anything else falls back to its length
fn numeric_size(value: &Value, policy: LengthPolicy) -> Option<f64> {
    as_number(value).or_else(|| measure_length(value, policy).map(|n| n as f64))
}

fn is_boolean(value: &Value, policy: BooleanPolicy) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) if policy == BooleanPolicy::AcceptTokens => {
            matches!(n.as_i64(), Some(0 | 1))
        }
        Value::String(s) if policy == BooleanPolicy::AcceptTokens => s == "0" || s == "1",
        _ => false,
    }
}

async fn check_unique(
    rule: &UniqueRule,
    value: &Value,
    context: &ValidationContext,
    store: &dyn UniquenessStore,
) -> Result<bool, StoreError> {
    let Some(value) = StoreValue::from_json(value) else {
        return Ok(false);
    };

    let exclude_id = match rule.except {
        Except::None => None,
        Except::Id(id) => Some(id),
        Except::FromContext => context.exclude_id,
    };

    let mut query = ExistenceQuery::new(&rule.table, &rule.column, value);
    if let Some(id) = exclude_id {
        query = query.excluding(&rule.id_column, id);
    }

    is_unique(store, &query).await
}

async fn check_exists(
    rule: &ExistsRule,
    value: &Value,
    store: &dyn UniquenessStore,
) -> Result<bool, StoreError> {
    let Some(value) = StoreValue::from_json(value) else {
        return Ok(false);
    };

    store
        .exists(&ExistenceQuery::new(&rule.table, &rule.column, value))
        .await
}
