//! RuleRegistry for resolving rule names into atoms.
//!
//! Declarations refer to rules by name; the registry maps each name to a
//! factory that checks the parameters and builds the [`RuleAtom`]. Custom
//! names (aliases, fixed parameterizations) can be registered on top of the
//! built-in vocabulary.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{DEFAULT_ID_COLUMN, EXCLUDE_ID_PLACEHOLDER};
use crate::utils::validation::is_sql_identifier;

use super::RuleSetError;
use super::atom::{Except, ExistsRule, RuleAtom, UniqueRule};

/// Arguments handed to a rule factory.
pub struct RuleArgs<'a> {
    /// Field the rule is declared on
    pub field: &'a str,
    pub params: &'a [String],
    /// Whether the chain also declares `numeric` or `integer`
    pub numeric: bool,
}

/// Factory function type for creating atoms from parameters.
///
/// Returns a human-readable reason when the parameters are unusable.
pub type RuleFactory = Arc<dyn Fn(&RuleArgs<'_>) -> Result<RuleAtom, String> + Send + Sync>;

/// Registry mapping rule names to atom factories.
pub struct RuleRegistry {
    factories: HashMap<String, RuleFactory>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a rule factory, replacing any previous one of that name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&RuleArgs<'_>) -> Result<RuleAtom, String> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Make `alias` resolve exactly like `target`.
    ///
    /// Returns false when `target` is not registered.
    pub fn alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        match self.factories.get(target).cloned() {
            Some(factory) => {
                self.factories.insert(alias.into(), factory);
                true
            }
            None => false,
        }
    }

    /// Check if a rule is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Create an atom by name.
    pub fn create(&self, name: &str, args: &RuleArgs<'_>) -> Result<RuleAtom, RuleSetError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RuleSetError::UnknownRule {
                field: args.field.to_string(),
                rule: name.to_string(),
            })?;

        factory(args).map_err(|reason| RuleSetError::InvalidParameter {
            field: args.field.to_string(),
            rule: name.to_string(),
            reason,
        })
    }

    /// Registry with the built-in rule vocabulary.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register("required", |args| no_params(args, RuleAtom::Required));
        registry.register("string", |args| no_params(args, RuleAtom::StringType));
        registry.register("email", |args| no_params(args, RuleAtom::Email));
        registry.register("boolean", |args| no_params(args, RuleAtom::Boolean));
        registry.register("confirmed", |args| no_params(args, RuleAtom::Confirmed));
        registry.register("numeric", |args| no_params(args, RuleAtom::Numeric));
        registry.register("integer", |args| no_params(args, RuleAtom::Integer));
        registry.register("alpha_num", |args| no_params(args, RuleAtom::AlphaNum));
        registry.register("uppercase", |args| no_params(args, RuleAtom::Uppercase));

        registry.register("max", |args| {
            if args.numeric {
                Ok(RuleAtom::Max(number_param(args)?))
            } else {
                Ok(RuleAtom::MaxLength(length_param(args)?))
            }
        });

        registry.register("min", |args| {
            if args.numeric {
                Ok(RuleAtom::Min(number_param(args)?))
            } else {
                Ok(RuleAtom::MinLength(length_param(args)?))
            }
        });

        registry.register("in", |args| {
            if args.params.iter().all(|p| p.is_empty()) {
                return Err("expects at least one candidate value".to_string());
            }
            Ok(RuleAtom::InSet(args.params.to_vec()))
        });

        registry.register("unique", unique_rule);
        registry.register("exists", exists_rule);

        registry.alias("bool", "boolean");
        registry.alias("int", "integer");

        registry
    }
}

fn no_params(args: &RuleArgs<'_>, atom: RuleAtom) -> Result<RuleAtom, String> {
    if args.params.is_empty() {
        Ok(atom)
    } else {
        Err("takes no parameters".to_string())
    }
}

fn single_param<'a>(args: &'a RuleArgs<'_>) -> Result<&'a str, String> {
    match args.params {
        [value] if !value.is_empty() => Ok(value.as_str()),
        _ => Err("expects exactly one parameter".to_string()),
    }
}

fn length_param(args: &RuleArgs<'_>) -> Result<usize, String> {
    let raw = single_param(args)?;
    raw.parse()
        .map_err(|_| format!("'{raw}' is not a non-negative integer"))
}

fn number_param(args: &RuleArgs<'_>) -> Result<f64, String> {
    let raw = single_param(args)?;
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}

fn identifier(raw: &str) -> Result<String, String> {
    if is_sql_identifier(raw) {
        Ok(raw.to_string())
    } else {
        Err(format!("'{raw}' is not a valid identifier"))
    }
}

/// `unique:table,column[,except[,id_column]]`
fn unique_rule(args: &RuleArgs<'_>) -> Result<RuleAtom, String> {
    let (table, column, except, id_column) = match args.params {
        [table, column] => (table, column, None, None),
        [table, column, except] => (table, column, Some(except), None),
        [table, column, except, id_column] => (table, column, Some(except), Some(id_column)),
        _ => return Err("expects table, column and an optional exclusion".to_string()),
    };

    let except = match except.map(String::as_str) {
        None | Some("") | Some("NULL") => Except::None,
        Some(EXCLUDE_ID_PLACEHOLDER) => Except::FromContext,
        Some(raw) => Except::Id(
            raw.parse()
                .map_err(|_| format!("'{raw}' is neither an id nor {EXCLUDE_ID_PLACEHOLDER}"))?,
        ),
    };

    Ok(RuleAtom::Unique(UniqueRule {
        table: identifier(table)?,
        column: identifier(column)?,
        except,
        id_column: identifier(id_column.map_or(DEFAULT_ID_COLUMN, String::as_str))?,
    }))
}

/// `exists:table[,column]`; the column defaults to the field name
fn exists_rule(args: &RuleArgs<'_>) -> Result<RuleAtom, String> {
    let (table, column) = match args.params {
        [table] => (table.as_str(), args.field),
        [table, column] => (table.as_str(), column.as_str()),
        _ => return Err("expects a table and an optional column".to_string()),
    };

    Ok(RuleAtom::Exists(ExistsRule {
        table: identifier(table)?,
        column: identifier(column)?,
    }))
}
