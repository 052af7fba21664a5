//! Compiled rule sets

use crate::models::Record;

use super::atom::{RuleAtom, RuleKind};

/// Execution plan for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    pub field: String,
    /// Skip the whole chain when the field is absent
    pub sometimes: bool,
    /// Skip non-implicit atoms when the value is null or blank
    pub nullable: bool,
    /// Stop the chain at its first failure
    pub bail: bool,
    pub atoms: Vec<RuleAtom>,
}

impl FieldRules {
    pub fn has(&self, kind: RuleKind) -> bool {
        self.atoms.iter().any(|atom| atom.kind() == kind)
    }

    pub fn is_required(&self) -> bool {
        self.has(RuleKind::Required)
    }
}

/// An ordered, immutable set of field execution plans.
///
/// Only [`compile`](super::compile) builds one, so every instance has
/// passed the declaration checks.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    name: String,
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub(crate) fn new(name: String, fields: Vec<FieldRules>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field plans in declaration order
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|rules| rules.field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The subset of `record` covered by this rule set.
    ///
    /// Undeclared keys (including `*_confirmation` siblings) are dropped,
    /// declared-but-absent fields stay absent.
    pub fn extract_validated(&self, record: &Record) -> Record {
        self.fields
            .iter()
            .filter_map(|rules| {
                record
                    .get(&rules.field)
                    .map(|value| (rules.field.clone(), value.clone()))
            })
            .collect()
    }
}
