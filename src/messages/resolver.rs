//! Turn validation failures into rendered messages

use std::sync::Arc;

use indexmap::IndexMap;

use crate::engine::ValidationResult;
use crate::rules::Failure;

use super::{AttributeTable, LocaleCatalog, MessageTable};

/// Renders failures with custom templates, falling back to the catalog
#[derive(Debug, Clone, Default)]
pub struct MessageResolver {
    catalog: Arc<LocaleCatalog>,
}

impl MessageResolver {
    pub fn new(catalog: LocaleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn default_locale(&self) -> &str {
        self.catalog.default_locale()
    }

    /// Field to rendered messages, in the result's order
    pub fn resolve(
        &self,
        result: &ValidationResult,
        messages: &MessageTable,
        attributes: &AttributeTable,
        locale: Option<&str>,
    ) -> IndexMap<String, Vec<String>> {
        result
            .iter()
            .map(|(field, failures)| {
                let rendered = failures
                    .iter()
                    .map(|failure| self.message(field, failure, messages, attributes, locale))
                    .collect();
                (field.to_string(), rendered)
            })
            .collect()
    }

    /// Render one failure
    pub fn message(
        &self,
        field: &str,
        failure: &Failure,
        messages: &MessageTable,
        attributes: &AttributeTable,
        locale: Option<&str>,
    ) -> String {
        let template = messages
            .get(field, failure.rule)
            .unwrap_or_else(|| self.catalog.generic(locale, failure.rule));

        render(template, attributes.label_or_field(field), &failure.params)
    }
}

/// Substitute `{attribute}`, `{Attribute}` and failure parameters.
///
/// Unknown placeholders are kept verbatim; substituted text is never
/// scanned again.
pub fn render(template: &str, label: &str, params: &[(String, String)]) -> String {
    let mut out = String::with_capacity(template.len() + label.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match name {
            "attribute" => out.push_str(label),
            "Attribute" => out.push_str(&capitalize(label)),
            _ => match params.iter().find(|(key, _)| key == name) {
                Some((_, value)) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleAtom, RuleKind};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_placeholders() {
        assert_eq!(
            render(
                "{Attribute} maksimal {max} karakter",
                "nomor telepon",
                &params(&[("max", "20")])
            ),
            "Nomor telepon maksimal 20 karakter"
        );
        assert_eq!(render("Email harus diisi", "email", &[]), "Email harus diisi");
        assert_eq!(render("{attribute} {unknown}", "nama", &[]), "nama {unknown}");
        assert_eq!(render("dangling {brace", "nama", &[]), "dangling {brace");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        assert_eq!(render("{attribute}", "{max}", &params(&[("max", "9")])), "{max}");
    }

    #[test]
    fn test_custom_message_wins_over_catalog() {
        let resolver = MessageResolver::new(LocaleCatalog::builtin("id"));
        let messages = MessageTable::new().with("email", RuleKind::Required, "Email harus diisi");
        let attributes = AttributeTable::new().with("email", "email");
        let failure = RuleAtom::Required.failure("email");

        assert_eq!(
            resolver.message("email", &failure, &messages, &attributes, Some("en")),
            "Email harus diisi"
        );
    }

    #[test]
    fn test_generic_message_by_locale() {
        let resolver = MessageResolver::new(LocaleCatalog::builtin("id"));
        let attributes = AttributeTable::new().with("nama", "nama");
        let failure = RuleAtom::MaxLength(255).failure("nama");

        assert_eq!(
            resolver.message("nama", &failure, &MessageTable::new(), &attributes, None),
            "Nama maksimal 255 karakter"
        );
        assert_eq!(
            resolver.message("nama", &failure, &MessageTable::new(), &attributes, Some("en")),
            "The nama field must not be greater than 255 characters."
        );
        assert_eq!(
            resolver.message("nama", &failure, &MessageTable::new(), &attributes, Some("fr")),
            "Nama maksimal 255 karakter"
        );
    }
}
