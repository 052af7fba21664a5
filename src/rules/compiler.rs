//! Compile rule set declarations into execution plans

use std::collections::HashSet;

use super::RuleSetError;
use super::declaration::{FieldDeclaration, RuleSetDeclaration, RuleToken};
use super::registry::{RuleArgs, RuleRegistry};
use super::ruleset::{FieldRules, RuleSet};

const SOMETIMES: &str = "sometimes";
const NULLABLE: &str = "nullable";
const BAIL: &str = "bail";

/// Names that switch `min`/`max` to numeric bounds
const NUMERIC_RULES: &[&str] = &["numeric", "integer", "int"];

/// Compile a declaration against a registry.
///
/// Pure; fails only when the declaration is malformed.
pub fn compile(
    declaration: &RuleSetDeclaration,
    registry: &RuleRegistry,
) -> Result<RuleSet, RuleSetError> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(declaration.fields.len());

    for field in &declaration.fields {
        if !seen.insert(field.field.as_str()) {
            return Err(RuleSetError::DuplicateField {
                ruleset: declaration.name.clone(),
                field: field.field.clone(),
            });
        }
        fields.push(compile_field(field, registry)?);
    }

    Ok(RuleSet::new(declaration.name.clone(), fields))
}

fn compile_field(
    declaration: &FieldDeclaration,
    registry: &RuleRegistry,
) -> Result<FieldRules, RuleSetError> {
    let field = declaration.field.as_str();
    let tokens = declaration.rules.tokens();

    let mut sometimes = false;
    let mut nullable = false;
    let mut bail = false;
    let mut rules: Vec<&RuleToken> = Vec::with_capacity(tokens.len());

    for (position, token) in tokens.iter().enumerate() {
        let flag = match token.name.as_str() {
            SOMETIMES => {
                if position != 0 {
                    return Err(RuleSetError::SometimesNotFirst {
                        field: field.to_string(),
                    });
                }
                &mut sometimes
            }
            NULLABLE => &mut nullable,
            BAIL => &mut bail,
            _ => {
                rules.push(token);
                continue;
            }
        };

        if *flag {
            return Err(RuleSetError::DuplicateModifier {
                field: field.to_string(),
                modifier: token.name.clone(),
            });
        }
        if !token.params.is_empty() {
            return Err(RuleSetError::InvalidParameter {
                field: field.to_string(),
                rule: token.name.clone(),
                reason: "takes no parameters".to_string(),
            });
        }
        *flag = true;
    }

    if rules.is_empty() {
        return Err(RuleSetError::EmptyChain {
            field: field.to_string(),
        });
    }

    let numeric = rules
        .iter()
        .any(|token| NUMERIC_RULES.contains(&token.name.as_str()));

    let atoms = rules
        .into_iter()
        .map(|token| {
            registry.create(
                &token.name,
                &RuleArgs {
                    field,
                    params: &token.params,
                    numeric,
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let compiled = FieldRules {
        field: field.to_string(),
        sometimes,
        nullable,
        bail,
        atoms,
    };

    if compiled.is_required() && nullable && !sometimes {
        return Err(RuleSetError::ContradictoryModifiers {
            field: field.to_string(),
        });
    }

    Ok(compiled)
}
