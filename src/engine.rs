//! Validation engine
//!
//! Runs a compiled [`RuleSet`] against a record and aggregates the failures
//! per field. Field failures are data; the only error is a store outage.

use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::db::UniquenessStore;
use crate::error::AppResult;
use crate::models::{Record, ValidationContext};
use crate::rules::{Evaluation, Failure, Outcome, RuleSet, evaluate};
use crate::utils::validation::{is_blank, is_empty_value};

/// How failures within one field are collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Run every atom and keep every failure
    #[default]
    CollectAll,
    /// Stop each field at its first failure
    Bail,
}

/// Which values `boolean` accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanPolicy {
    /// `true`, `false`, `0`, `1`, `"0"`, `"1"`
    #[default]
    AcceptTokens,
    /// JSON booleans only
    Strict,
}

/// How length rules treat numbers and booleans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Measure their JSON text
    #[default]
    Stringify,
    /// Fail any non-string, non-array value
    Strict,
}

impl FromStr for FailureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "collect_all" | "collect-all" | "all" => Ok(Self::CollectAll),
            "bail" | "fail_fast" | "fail-fast" => Ok(Self::Bail),
            other => Err(format!("unknown failure mode '{other}'")),
        }
    }
}

impl FromStr for BooleanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accept_tokens" | "tokens" => Ok(Self::AcceptTokens),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown boolean policy '{other}'")),
        }
    }
}

impl FromStr for LengthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stringify" => Ok(Self::Stringify),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown length policy '{other}'")),
        }
    }
}

/// Engine behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub failure_mode: FailureMode,
    /// Stop processing further fields once one field has failed
    pub stop_on_first_failure: bool,
    pub boolean_policy: BooleanPolicy,
    pub length_policy: LengthPolicy,
}

/// Failures per field, in rule set declaration order.
///
/// Only failing fields are stored, so the result is valid iff it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    failures: IndexMap<String, Vec<Failure>>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures for `field`; empty when it passed or was not checked
    pub fn failures_for(&self, field: &str) -> &[Failure] {
        self.failures.get(field).map_or(&[][..], Vec::as_slice)
    }

    /// Failing fields with their failures
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Failure])> {
        self.failures
            .iter()
            .map(|(field, failures)| (field.as_str(), failures.as_slice()))
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Field to ordered rule codes
    pub fn codes(&self) -> IndexMap<String, Vec<String>> {
        self.failures
            .iter()
            .map(|(field, failures)| {
                let codes = failures.iter().map(|f| f.rule.to_string()).collect();
                (field.clone(), codes)
            })
            .collect()
    }

    fn push(&mut self, field: &str, failure: Failure) {
        self.failures
            .entry(field.to_string())
            .or_default()
            .push(failure);
    }
}

/// Runs rule sets against records.
///
/// Holds no per-call state, so one engine serves concurrent validations.
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn UniquenessStore>,
    options: EngineOptions,
}

impl Engine {
    pub fn new(store: Arc<dyn UniquenessStore>, options: EngineOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Validate `record` against `ruleset`.
    ///
    /// Returns `Err` only when a `unique`/`exists` lookup could not reach
    /// the store.
    pub async fn validate(
        &self,
        ruleset: &RuleSet,
        record: &Record,
        context: &ValidationContext,
    ) -> AppResult<ValidationResult> {
        let mut result = ValidationResult::default();

        for rules in ruleset.fields() {
            let value = record.get(&rules.field);

            if rules.sometimes && value.is_none() {
                continue;
            }

            // Absent or blank values only meet implicit rules; so do
            // null-ish values of nullable fields.
            let skip_explicit = value.is_none_or(is_blank)
                || (rules.nullable && value.is_some_and(is_empty_value));
            let bail = rules.bail || self.options.failure_mode == FailureMode::Bail;

            let input = Evaluation {
                field: &rules.field,
                value,
                record,
                context,
                options: &self.options,
            };

            let mut failed = false;
            for atom in &rules.atoms {
                if skip_explicit && !atom.kind().is_implicit() {
                    continue;
                }

                let outcome = evaluate(atom, &input, self.store.as_ref())
                    .await
                    .inspect_err(|e| {
                        tracing::warn!(
                            ruleset = ruleset.name(),
                            field = %rules.field,
                            rule = %atom.kind(),
                            error = %e,
                            "Store lookup failed during validation"
                        );
                    })?;

                if let Outcome::Fail(failure) = outcome {
                    failed = true;
                    result.push(&rules.field, failure);
                    if bail {
                        break;
                    }
                }
            }

            if failed && self.options.stop_on_first_failure {
                break;
            }
        }

        tracing::debug!(
            ruleset = ruleset.name(),
            failed_fields = result.len(),
            "Validation finished"
        );

        Ok(result)
    }
}
