//! Database module
//!
//! The external store seam for `unique` and `exists` rules: a read-only
//! existence query, answered by Postgres in production and by an in-memory
//! table set in tests and database-less runs.

pub mod connection;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;

pub use connection::*;
pub use memory::InMemoryStore;
pub use postgres::PgUniquenessStore;

/// Store failures. Always infrastructure, never a validation verdict.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query timed out after {0}ms")]
    Timeout(u64),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// A scalar value looked up in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    Text(String),
    Integer(i64),
}

impl StoreValue {
    /// Scalars only; null, arrays and objects have no stored counterpart.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Text(n.to_string()),
            }),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Textual form used for loose comparison
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
        }
    }
}

/// The row left out of an existence query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedRecord {
    pub column: String,
    pub id: i64,
}

/// `EXISTS(table WHERE column = value [AND id_column <> id])`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceQuery {
    pub table: String,
    pub column: String,
    pub value: StoreValue,
    pub exclude: Option<ExcludedRecord>,
}

impl ExistenceQuery {
    pub fn new(table: impl Into<String>, column: impl Into<String>, value: StoreValue) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            value,
            exclude: None,
        }
    }

    /// Ignore the row whose `column` equals `id`
    pub fn excluding(mut self, column: impl Into<String>, id: i64) -> Self {
        self.exclude = Some(ExcludedRecord {
            column: column.into(),
            id,
        });
        self
    }
}

/// Read-only existence lookups against the external store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniquenessStore: Send + Sync {
    /// Whether any row matches the query
    async fn exists(&self, query: &ExistenceQuery) -> Result<bool, StoreError>;
}

/// True when no other row already holds the value
pub async fn is_unique(
    store: &dyn UniquenessStore,
    query: &ExistenceQuery,
) -> Result<bool, StoreError> {
    Ok(!store.exists(query).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_value_from_json() {
        assert_eq!(
            StoreValue::from_json(&json!("a@x.com")),
            Some(StoreValue::Text("a@x.com".into()))
        );
        assert_eq!(StoreValue::from_json(&json!(5)), Some(StoreValue::Integer(5)));
        assert_eq!(
            StoreValue::from_json(&json!(2.5)),
            Some(StoreValue::Text("2.5".into()))
        );
        assert_eq!(StoreValue::from_json(&Value::Null), None);
        assert_eq!(StoreValue::from_json(&json!(["a"])), None);
    }

    #[tokio::test]
    async fn test_is_unique_negates_exists() {
        let mut store = MockUniquenessStore::new();
        store
            .expect_exists()
            .withf(|q| q.table == "users" && q.exclude.as_ref().is_some_and(|e| e.id == 5))
            .times(1)
            .returning(|_| Ok(false));

        let query = ExistenceQuery::new("users", "email", StoreValue::Text("a@x.com".into()))
            .excluding("id", 5);
        assert!(is_unique(&store, &query).await.unwrap());
    }
}
