//! Primitive rule atoms and their failure records

use std::fmt;

use serde::{Serialize, Serializer};

use crate::constants::CONFIRMATION_SUFFIX;
use crate::utils::validation::format_number;

/// Parameter-free discriminant of a [`RuleAtom`].
///
/// Doubles as the machine-readable failure code; its wire name is the rule
/// name used in declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    StringType,
    MaxLength,
    MinLength,
    Email,
    InSet,
    Unique,
    Boolean,
    Confirmed,
    Numeric,
    Integer,
    Min,
    Max,
    Exists,
    AlphaNum,
    Uppercase,
}

impl RuleKind {
    pub const ALL: [RuleKind; 16] = [
        Self::Required,
        Self::StringType,
        Self::MaxLength,
        Self::MinLength,
        Self::Email,
        Self::InSet,
        Self::Unique,
        Self::Boolean,
        Self::Confirmed,
        Self::Numeric,
        Self::Integer,
        Self::Min,
        Self::Max,
        Self::Exists,
        Self::AlphaNum,
        Self::Uppercase,
    ];

    /// Wire name of the rule
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::StringType => "string",
            Self::MaxLength | Self::Max => "max",
            Self::MinLength | Self::Min => "min",
            Self::Email => "email",
            Self::InSet => "in",
            Self::Unique => "unique",
            Self::Boolean => "boolean",
            Self::Confirmed => "confirmed",
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Exists => "exists",
            Self::AlphaNum => "alpha_num",
            Self::Uppercase => "uppercase",
        }
    }

    /// Every kind answering to a wire name (`max` covers both bounds).
    pub fn for_rule_name(name: &str) -> Vec<RuleKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.as_str() == name)
            .collect()
    }

    /// Implicit rules still run when the value is absent or blank.
    pub const fn is_implicit(self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which record, if any, a uniqueness check ignores
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Except {
    None,
    /// A fixed identifier written into the declaration
    Id(i64),
    /// The context's `exclude_id`, resolved at validation time
    FromContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueRule {
    pub table: String,
    pub column: String,
    pub except: Except,
    pub id_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsRule {
    pub table: String,
    pub column: String,
}

/// A primitive constraint with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum RuleAtom {
    Required,
    StringType,
    MaxLength(usize),
    MinLength(usize),
    Email,
    InSet(Vec<String>),
    Unique(UniqueRule),
    Boolean,
    Confirmed,
    Numeric,
    Integer,
    Min(f64),
    Max(f64),
    Exists(ExistsRule),
    /// Letters and digits only
    AlphaNum,
    /// A string already in upper case
    Uppercase,
}

impl RuleAtom {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::StringType => RuleKind::StringType,
            Self::MaxLength(_) => RuleKind::MaxLength,
            Self::MinLength(_) => RuleKind::MinLength,
            Self::Email => RuleKind::Email,
            Self::InSet(_) => RuleKind::InSet,
            Self::Unique(_) => RuleKind::Unique,
            Self::Boolean => RuleKind::Boolean,
            Self::Confirmed => RuleKind::Confirmed,
            Self::Numeric => RuleKind::Numeric,
            Self::Integer => RuleKind::Integer,
            Self::Min(_) => RuleKind::Min,
            Self::Max(_) => RuleKind::Max,
            Self::Exists(_) => RuleKind::Exists,
            Self::AlphaNum => RuleKind::AlphaNum,
            Self::Uppercase => RuleKind::Uppercase,
        }
    }

    /// Build the failure record for this atom on `field`
    pub fn failure(&self, field: &str) -> Failure {
        let params = match self {
            Self::MaxLength(n) => vec![("max", n.to_string())],
            Self::MinLength(n) => vec![("min", n.to_string())],
            Self::Max(n) => vec![("max", format_number(*n))],
            Self::Min(n) => vec![("min", format_number(*n))],
            Self::InSet(values) => vec![("values", values.join(", "))],
            Self::Confirmed => vec![("other", format!("{field}{CONFIRMATION_SUFFIX}"))],
            _ => Vec::new(),
        };

        Failure {
            rule: self.kind(),
            params: params
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

/// One failed atom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub rule: RuleKind,
    /// Placeholder values for message templates, in a stable order
    pub params: Vec<(String, String)>,
}

impl Failure {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Result of evaluating one atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(Failure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_wire_names() {
        assert_eq!(
            RuleKind::for_rule_name("max"),
            vec![RuleKind::MaxLength, RuleKind::Max]
        );
        assert_eq!(RuleKind::for_rule_name("string"), vec![RuleKind::StringType]);
        assert!(RuleKind::for_rule_name("regex").is_empty());
    }

    #[test]
    fn test_only_required_is_implicit() {
        let implicit: Vec<_> = RuleKind::ALL
            .into_iter()
            .filter(|kind| kind.is_implicit())
            .collect();
        assert_eq!(implicit, vec![RuleKind::Required]);
    }

    #[test]
    fn test_failure_params() {
        let failure = RuleAtom::MaxLength(255).failure("nama");
        assert_eq!(failure.rule, RuleKind::MaxLength);
        assert_eq!(failure.param("max"), Some("255"));

        let failure = RuleAtom::Max(999999.99).failure("total_kapasitas");
        assert_eq!(failure.param("max"), Some("999999.99"));

        let failure = RuleAtom::Confirmed.failure("password");
        assert_eq!(failure.param("other"), Some("password_confirmation"));

        let failure = RuleAtom::InSet(vec!["a".into(), "b".into()]).failure("role");
        assert_eq!(failure.param("values"), Some("a, b"));
        assert_eq!(failure.param("max"), None);
    }

    #[test]
    fn test_kind_serializes_as_wire_name() {
        let json = serde_json::to_string(&RuleKind::StringType).unwrap();
        assert_eq!(json, "\"string\"");
    }
}
