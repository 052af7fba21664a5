//! Postgres-backed existence lookups

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use super::{ExistenceQuery, StoreError, UniquenessStore};

/// Answers existence queries with one `SELECT EXISTS(...)` each.
///
/// Identifiers are quoted, values are always bound as text and compared
/// against the column's text form, and every query is bounded by
/// `query_timeout`.
#[derive(Clone)]
pub struct PgUniquenessStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgUniquenessStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// SQL text for a query; `$1` is the value, `$2` the excluded id.
    pub fn build_sql(query: &ExistenceQuery) -> String {
        let table = quote_ident(&query.table);
        let column = quote_ident(&query.column);

        // A typed bind would make Postgres reject e.g. varchar = bigint
        let condition = format!("{column}::text = $1");

        match &query.exclude {
            Some(exclude) => format!(
                "SELECT EXISTS(SELECT 1 FROM {table} WHERE {condition} AND {} <> $2)",
                quote_ident(&exclude.column)
            ),
            None => format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {condition})"),
        }
    }
}

#[async_trait]
impl UniquenessStore for PgUniquenessStore {
    async fn exists(&self, query: &ExistenceQuery) -> Result<bool, StoreError> {
        let sql = Self::build_sql(query);

        let mut statement =
            sqlx::query_scalar::<Postgres, bool>(&sql).bind(query.value.as_text());
        if let Some(exclude) = &query.exclude {
            statement = statement.bind(exclude.id);
        }

        match tokio::time::timeout(self.query_timeout, statement.fetch_one(&self.pool)).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                let timeout_ms = self.query_timeout.as_millis() as u64;
                tracing::warn!(
                    table = %query.table,
                    column = %query.column,
                    timeout_ms,
                    "Existence query timed out"
                );
                Err(StoreError::Timeout(timeout_ms))
            }
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
