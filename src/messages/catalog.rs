//! Generic per-locale message templates

use std::collections::HashMap;

use crate::constants::DEFAULT_LOCALE;
use crate::rules::RuleKind;

/// Last-resort template when no locale knows the rule
pub const FALLBACK_TEMPLATE: &str = "{Attribute} tidak valid";

const ID_TEMPLATES: &[(RuleKind, &str)] = &[
    (RuleKind::Required, "{Attribute} harus diisi"),
    (RuleKind::StringType, "{Attribute} harus berupa teks"),
    (RuleKind::MaxLength, "{Attribute} maksimal {max} karakter"),
    (RuleKind::MinLength, "{Attribute} minimal {min} karakter"),
    (RuleKind::Email, "Format {attribute} tidak valid"),
    (RuleKind::InSet, "{Attribute} yang dipilih tidak valid"),
    (RuleKind::Unique, "{Attribute} sudah digunakan"),
    (RuleKind::Boolean, "{Attribute} harus berupa boolean"),
    (RuleKind::Confirmed, "Konfirmasi {attribute} tidak cocok"),
    (RuleKind::Numeric, "{Attribute} harus berupa angka"),
    (RuleKind::Integer, "{Attribute} harus berupa bilangan bulat"),
    (RuleKind::Min, "{Attribute} minimal {min}"),
    (RuleKind::Max, "{Attribute} maksimal {max}"),
    (RuleKind::Exists, "{Attribute} yang dipilih tidak ditemukan"),
    (RuleKind::AlphaNum, "{Attribute} hanya boleh berisi huruf dan angka"),
    (RuleKind::Uppercase, "{Attribute} harus menggunakan huruf kapital"),
];

const EN_TEMPLATES: &[(RuleKind, &str)] = &[
    (RuleKind::Required, "The {attribute} field is required."),
    (RuleKind::StringType, "The {attribute} field must be a string."),
    (RuleKind::MaxLength, "The {attribute} field must not be greater than {max} characters."),
    (RuleKind::MinLength, "The {attribute} field must be at least {min} characters."),
    (RuleKind::Email, "The {attribute} field must be a valid email address."),
    (RuleKind::InSet, "The selected {attribute} is invalid."),
    (RuleKind::Unique, "The {attribute} has already been taken."),
    (RuleKind::Boolean, "The {attribute} field must be true or false."),
    (RuleKind::Confirmed, "The {attribute} field confirmation does not match."),
    (RuleKind::Numeric, "The {attribute} field must be a number."),
    (RuleKind::Integer, "The {attribute} field must be an integer."),
    (RuleKind::Min, "The {attribute} field must be at least {min}."),
    (RuleKind::Max, "The {attribute} field must not be greater than {max}."),
    (RuleKind::Exists, "The selected {attribute} is invalid."),
    (RuleKind::AlphaNum, "The {attribute} field must only contain letters and numbers."),
    (RuleKind::Uppercase, "The {attribute} field must be uppercase."),
];

/// Generic templates per locale, with a default locale to fall back on
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    locales: HashMap<String, HashMap<RuleKind, String>>,
    default_locale: String,
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::builtin(DEFAULT_LOCALE)
    }
}

impl LocaleCatalog {
    /// Empty catalog; every lookup ends at [`FALLBACK_TEMPLATE`]
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            locales: HashMap::new(),
            default_locale: default_locale.into(),
        }
    }

    /// Catalog with the built-in `id` and `en` templates
    pub fn builtin(default_locale: impl Into<String>) -> Self {
        let mut catalog = Self::new(default_locale);
        catalog.insert_locale("id", ID_TEMPLATES.iter().copied());
        catalog.insert_locale("en", EN_TEMPLATES.iter().copied());
        catalog
    }

    /// Add or extend a locale
    pub fn insert_locale<I, T>(&mut self, locale: impl Into<String>, templates: I)
    where
        I: IntoIterator<Item = (RuleKind, T)>,
        T: Into<String>,
    {
        let entry = self.locales.entry(locale.into()).or_default();
        for (kind, template) in templates {
            entry.insert(kind, template.into());
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Template from one locale only
    pub fn template(&self, locale: &str, kind: RuleKind) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|templates| templates.get(&kind))
            .map(String::as_str)
    }

    /// Requested locale, then the default locale, then [`FALLBACK_TEMPLATE`]
    pub fn generic(&self, locale: Option<&str>, kind: RuleKind) -> &str {
        locale
            .and_then(|locale| self.template(locale, kind))
            .or_else(|| self.template(&self.default_locale, kind))
            .unwrap_or(FALLBACK_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_locales_cover_every_kind() {
        let catalog = LocaleCatalog::builtin("id");
        for kind in RuleKind::ALL {
            assert!(catalog.template("id", kind).is_some(), "id lacks {kind:?}");
            assert!(catalog.template("en", kind).is_some(), "en lacks {kind:?}");
        }
    }

    #[test]
    fn test_fallback_chain() {
        let mut catalog = LocaleCatalog::new("id");
        catalog.insert_locale("id", [(RuleKind::Required, "{Attribute} harus diisi")]);
        catalog.insert_locale("jv", [(RuleKind::Email, "{Attribute} ora valid")]);

        assert_eq!(catalog.generic(Some("jv"), RuleKind::Email), "{Attribute} ora valid");
        assert_eq!(
            catalog.generic(Some("jv"), RuleKind::Required),
            "{Attribute} harus diisi"
        );
        assert_eq!(catalog.generic(None, RuleKind::Unique), FALLBACK_TEMPLATE);
    }
}
