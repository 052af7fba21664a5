//! In-memory existence lookups for tests and database-less runs

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::models::{Record, record_from_value};

use super::{ExistenceQuery, StoreError, StoreValue, UniquenessStore};

/// Tables of JSON rows keyed by table name
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row before the store is shared; non-object rows are ignored.
    pub fn with_row(mut self, table: impl Into<String>, row: Value) -> Self {
        if let Some(row) = record_from_value(row) {
            self.tables
                .get_mut()
                .entry(table.into())
                .or_default()
                .push(row);
        }
        self
    }

    /// Add a row to a shared store
    pub async fn insert(&self, table: impl Into<String>, row: Record) {
        self.tables
            .write()
            .await
            .entry(table.into())
            .or_default()
            .push(row);
    }

    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }
}

fn row_matches(row: &Record, query: &ExistenceQuery) -> bool {
    let wanted = query.value.as_text();
    let hit = row
        .get(&query.column)
        .and_then(StoreValue::from_json)
        .is_some_and(|stored| stored.as_text() == wanted);

    let excluded = query.exclude.as_ref().is_some_and(|exclude| {
        row.get(&exclude.column).and_then(Value::as_i64) == Some(exclude.id)
    });

    hit && !excluded
}

#[async_trait]
impl UniquenessStore for InMemoryStore {
    async fn exists(&self, query: &ExistenceQuery) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&query.table)
            .is_some_and(|rows| rows.iter().any(|row| row_matches(row, query))))
    }
}
