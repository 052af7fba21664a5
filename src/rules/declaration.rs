//! Declarative rule syntax
//!
//! A field's rules are written either as one pipe-delimited string
//! (`"sometimes|required|string|max:255"`) or as a list of rule strings.
//! Each rule reads `name[:param1,param2,...]`.

use serde::{Deserialize, Serialize};

/// A field's rule chain as declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleList {
    Piped(String),
    List(Vec<String>),
}

/// One parsed rule reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken {
    pub name: String,
    pub params: Vec<String>,
}

impl RuleToken {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().split_once(':') {
            Some((name, params)) => Self {
                name: name.trim().to_string(),
                params: params.split(',').map(|p| p.trim().to_string()).collect(),
            },
            None => Self {
                name: raw.trim().to_string(),
                params: Vec::new(),
            },
        }
    }
}

impl RuleList {
    /// Parsed rule references in declaration order; empty segments are dropped
    pub fn tokens(&self) -> Vec<RuleToken> {
        let raw: Vec<&str> = match self {
            Self::Piped(chain) => chain.split('|').collect(),
            Self::List(items) => items.iter().map(String::as_str).collect(),
        };

        raw.into_iter()
            .filter(|segment| !segment.trim().is_empty())
            .map(RuleToken::parse)
            .collect()
    }
}

impl From<&str> for RuleList {
    fn from(chain: &str) -> Self {
        Self::Piped(chain.to_string())
    }
}

impl From<String> for RuleList {
    fn from(chain: String) -> Self {
        Self::Piped(chain)
    }
}

impl From<Vec<&str>> for RuleList {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for RuleList {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Rules declared for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub field: String,
    pub rules: RuleList,
}

/// An uncompiled rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetDeclaration {
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
}

impl RuleSetDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field declaration
    pub fn field(mut self, field: impl Into<String>, rules: impl Into<RuleList>) -> Self {
        self.fields.push(FieldDeclaration {
            field: field.into(),
            rules: rules.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piped_chain() {
        let tokens = RuleList::from("sometimes|required|string|max:255").tokens();
        let names: Vec<_> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["sometimes", "required", "string", "max"]);
        assert_eq!(tokens[3].params, vec!["255"]);
    }

    #[test]
    fn test_list_with_parameters() {
        let tokens = RuleList::from(vec!["required", "unique:users, email ,{exclude_id}"]).tokens();
        assert_eq!(tokens[1].name, "unique");
        assert_eq!(tokens[1].params, vec!["users", "email", "{exclude_id}"]);
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert!(RuleList::from("").tokens().is_empty());
        assert_eq!(RuleList::from("required||string|").tokens().len(), 2);
    }

    #[test]
    fn test_deserializes_both_forms() {
        let json = r#"[
            {"field": "nama", "rules": "required|string"},
            {"field": "role", "rules": ["required", "in:a,b"]}
        ]"#;
        let fields: Vec<FieldDeclaration> = serde_json::from_str(json).unwrap();
        assert_eq!(fields[0].rules, RuleList::Piped("required|string".into()));
        assert_eq!(
            fields[1].rules,
            RuleList::List(vec!["required".into(), "in:a,b".into()])
        );
    }
}
