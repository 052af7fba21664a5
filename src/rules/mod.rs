//! Declarative rules
//!
//! Declarations (pipe strings or lists per field) are compiled once through
//! a [`RuleRegistry`] into immutable [`RuleSet`]s; the evaluator checks one
//! [`RuleAtom`] against one value.

pub mod atom;
pub mod compiler;
pub mod declaration;
pub mod evaluator;
pub mod registry;
pub mod ruleset;

pub use atom::{Except, ExistsRule, Failure, Outcome, RuleAtom, RuleKind, UniqueRule};
pub use compiler::compile;
pub use declaration::{FieldDeclaration, RuleList, RuleSetDeclaration};
pub use evaluator::{Evaluation, evaluate};
pub use registry::{RuleArgs, RuleRegistry};
pub use ruleset::{FieldRules, RuleSet};

/// Malformed rule set declarations.
///
/// Raised while building a catalog, never per request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleSetError {
    #[error("field '{field}': unknown rule '{rule}'")]
    UnknownRule { field: String, rule: String },

    #[error("field '{field}': invalid parameters for '{rule}': {reason}")]
    InvalidParameter {
        field: String,
        rule: String,
        reason: String,
    },

    #[error("field '{field}': 'sometimes' must come first")]
    SometimesNotFirst { field: String },

    #[error("field '{field}': modifier '{modifier}' is declared more than once")]
    DuplicateModifier { field: String, modifier: String },

    #[error("field '{field}': 'required' and 'nullable' conflict without 'sometimes'")]
    ContradictoryModifiers { field: String },

    #[error("rule set '{ruleset}': field '{field}' is declared more than once")]
    DuplicateField { ruleset: String, field: String },

    #[error("field '{field}' declares no rules")]
    EmptyChain { field: String },

    #[error("message key '{key}' does not name a field and a known rule")]
    InvalidMessageKey { key: String },
}
