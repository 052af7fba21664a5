//! Request definitions
//!
//! A request bundles a compiled rule set with its messages, attribute
//! labels and the capability a principal needs to submit it. Requests are
//! built once into a [`RequestCatalog`] and shared read-only.

pub mod barang;
pub mod gudang;
pub mod kategori_barang;
pub mod users;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::messages::{AttributeTable, MessageTable};
use crate::rules::{
    FieldDeclaration, RuleList, RuleRegistry, RuleSet, RuleSetDeclaration, RuleSetError, compile,
};

/// Uncompiled request definition, as written in request files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRequestDefinition {
    pub name: String,
    /// Capability checked before validation; `None` admits everyone
    #[serde(default)]
    pub capability: Option<String>,
    pub fields: Vec<FieldDeclaration>,
    /// Custom templates keyed `"field.rule"`
    #[serde(default)]
    pub messages: IndexMap<String, String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl FormRequestDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capability: None,
            fields: Vec::new(),
            messages: IndexMap::new(),
            attributes: IndexMap::new(),
        }
    }

    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    pub fn field(mut self, field: impl Into<String>, rules: impl Into<RuleList>) -> Self {
        self.fields.push(FieldDeclaration {
            field: field.into(),
            rules: rules.into(),
        });
        self
    }

    pub fn message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    pub fn attribute(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.attributes.insert(field.into(), label.into());
        self
    }

    /// Compile into a shareable request
    pub fn build(&self, registry: &RuleRegistry) -> Result<FormRequest, RuleSetError> {
        let declaration = RuleSetDeclaration {
            name: self.name.clone(),
            fields: self.fields.clone(),
        };

        Ok(FormRequest {
            name: self.name.clone(),
            capability: self.capability.clone(),
            ruleset: Arc::new(compile(&declaration, registry)?),
            messages: Arc::new(MessageTable::from_dotted(&self.messages)?),
            attributes: Arc::new(AttributeTable::from_pairs(self.attributes.clone())),
        })
    }
}

/// A compiled, immutable request
#[derive(Debug, Clone)]
pub struct FormRequest {
    pub name: String,
    pub capability: Option<String>,
    pub ruleset: Arc<RuleSet>,
    pub messages: Arc<MessageTable>,
    pub attributes: Arc<AttributeTable>,
}

/// Named requests available to the validation service
#[derive(Debug, Clone, Default)]
pub struct RequestCatalog {
    requests: HashMap<String, Arc<FormRequest>>,
}

impl RequestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the user, gudang, barang and category requests
    pub fn builtin(registry: &RuleRegistry) -> Result<Self, RuleSetError> {
        let mut catalog = Self::new();
        for definition in builtin_definitions() {
            catalog.insert(definition.build(registry)?);
        }
        Ok(catalog)
    }

    /// Add a request, returning the one it replaced
    pub fn insert(&mut self, request: FormRequest) -> Option<Arc<FormRequest>> {
        let replaced = self
            .requests
            .insert(request.name.clone(), Arc::new(request));
        if let Some(previous) = &replaced {
            tracing::warn!(request = %previous.name, "Request definition replaced");
        }
        replaced
    }

    pub fn get(&self, name: &str) -> AppResult<Arc<FormRequest>> {
        self.requests
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::UnknownRequest(name.to_string()))
    }

    /// Request names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.requests.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Compile and add every definition from a JSON request file.
    ///
    /// Nothing is added unless the whole file compiles.
    pub fn load_file(&mut self, path: &Path, registry: &RuleRegistry) -> AppResult<usize> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let definitions: Vec<FormRequestDefinition> = serde_json::from_str(&raw)?;

        let requests = definitions
            .iter()
            .map(|definition| definition.build(registry))
            .collect::<Result<Vec<_>, _>>()?;

        let count = requests.len();
        for request in requests {
            self.insert(request);
        }

        tracing::info!(path = %path.display(), count, "Loaded request definitions");
        Ok(count)
    }
}

/// Every built-in request definition
pub fn builtin_definitions() -> Vec<FormRequestDefinition> {
    vec![
        users::store(),
        users::update(),
        gudang::store(),
        gudang::update(),
        barang::store(),
        barang::update(),
        kategori_barang::store(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_compiles() {
        let catalog = RequestCatalog::builtin(&RuleRegistry::builtin()).unwrap();
        assert_eq!(
            catalog.names(),
            vec![
                "barang.store",
                "barang.update",
                "gudang.store",
                "gudang.update",
                "kategori_barang.store",
                "users.store",
                "users.update",
            ]
        );

        let store = catalog.get("users.store").unwrap();
        assert_eq!(store.capability.as_deref(), Some("users.create"));
        assert!(catalog.get("gudang.store").unwrap().capability.is_none());
    }

    #[test]
    fn test_unknown_request() {
        let catalog = RequestCatalog::new();
        assert!(matches!(
            catalog.get("users.store"),
            Err(AppError::UnknownRequest(name)) if name == "users.store"
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "name": "kategori.store",
                "capability": "kategori-barang.create",
                "fields": [{{"field": "nama_kategori", "rules": "required|string|max:100"}}],
                "messages": {{"nama_kategori.required": "Nama kategori harus diisi"}},
                "attributes": {{"nama_kategori": "nama kategori"}}
            }}]"#
        )
        .unwrap();

        let mut catalog = RequestCatalog::new();
        let count = catalog.load_file(file.path(), &RuleRegistry::builtin()).unwrap();
        assert_eq!(count, 1);

        let request = catalog.get("kategori.store").unwrap();
        assert_eq!(request.ruleset.len(), 1);
        assert_eq!(request.attributes.label("nama_kategori"), Some("nama kategori"));
    }

    #[test]
    fn test_load_file_rejects_malformed_rules() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "x", "fields": [{{"field": "a", "rules": "required|nullable"}}]}}]"#
        )
        .unwrap();

        let mut catalog = RequestCatalog::new();
        let err = catalog
            .load_file(file.path(), &RuleRegistry::builtin())
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedRuleSet(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let mut catalog = RequestCatalog::new();
        let err = catalog
            .load_file(Path::new("/nonexistent/requests.json"), &RuleRegistry::builtin())
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
