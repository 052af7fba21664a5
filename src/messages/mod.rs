//! Localized error messages
//!
//! Custom templates per (field, rule), display labels per field, and a
//! per-locale catalog of generic templates used when no custom one exists.

pub mod catalog;
pub mod resolver;

use std::collections::HashMap;

use crate::rules::{RuleKind, RuleSetError};

pub use catalog::{FALLBACK_TEMPLATE, LocaleCatalog};
pub use resolver::{MessageResolver, render};

/// Custom message templates keyed by field and rule kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    templates: HashMap<(String, RuleKind), String>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        kind: RuleKind,
        template: impl Into<String>,
    ) {
        self.templates.insert((field.into(), kind), template.into());
    }

    pub fn with(
        mut self,
        field: impl Into<String>,
        kind: RuleKind,
        template: impl Into<String>,
    ) -> Self {
        self.insert(field, kind, template);
        self
    }

    /// Build from dotted keys such as `"nama.max"`.
    ///
    /// The rule part maps to every kind sharing that wire name, so
    /// `"berat.max"` covers both the length and the numeric bound.
    pub fn from_dotted<I, K, V>(entries: I) -> Result<Self, RuleSetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (key, template) in entries {
            let key = key.as_ref();
            let invalid = || RuleSetError::InvalidMessageKey {
                key: key.to_string(),
            };

            let (field, rule) = key.rsplit_once('.').ok_or_else(invalid)?;
            let kinds = RuleKind::for_rule_name(rule);
            if field.is_empty() || kinds.is_empty() {
                return Err(invalid());
            }

            let template = template.into();
            for kind in kinds {
                table.insert(field, kind, template.clone());
            }
        }
        Ok(table)
    }

    pub fn get(&self, field: &str, kind: RuleKind) -> Option<&str> {
        self.templates
            .get(&(field.to_string(), kind))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Display labels for fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    labels: HashMap<String, String>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(field, label)| (field.into(), label.into()))
                .collect(),
        }
    }

    pub fn label(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    /// The label, or the field name itself when none is declared
    pub fn label_or_field<'a>(&'a self, field: &'a str) -> &'a str {
        self.label(field).unwrap_or(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_keys() {
        let table = MessageTable::from_dotted([
            ("email.required", "Email harus diisi"),
            ("berat.max", "Berat terlalu besar"),
        ])
        .unwrap();

        assert_eq!(table.get("email", RuleKind::Required), Some("Email harus diisi"));
        assert_eq!(table.get("berat", RuleKind::Max), Some("Berat terlalu besar"));
        assert_eq!(table.get("berat", RuleKind::MaxLength), Some("Berat terlalu besar"));
        assert_eq!(table.get("email", RuleKind::Email), None);
    }

    #[test]
    fn test_dotted_keys_use_last_segment_as_rule() {
        let table = MessageTable::from_dotted([("alamat.kota.string", "Kota harus teks")]).unwrap();
        assert_eq!(table.get("alamat.kota", RuleKind::StringType), Some("Kota harus teks"));
    }

    #[test]
    fn test_invalid_dotted_keys() {
        assert!(MessageTable::from_dotted([("email", "x")]).is_err());
        assert!(MessageTable::from_dotted([("email.regex", "x")]).is_err());
        assert!(MessageTable::from_dotted([(".required", "x")]).is_err());
    }

    #[test]
    fn test_attribute_fallback_to_field_name() {
        let attributes = AttributeTable::new().with("nomor_telepon", "nomor telepon");
        assert_eq!(attributes.label_or_field("nomor_telepon"), "nomor telepon");
        assert_eq!(attributes.label_or_field("email"), "email");
    }
}
