//! Application state management
//!
//! This module contains the shared, read-only state every validation runs
//! against. It is assembled once from [`Config`] at startup.

use std::sync::Arc;

use tracing::{info, warn};

use crate::authorization::{CapabilityChecker, StaticPermissions};
use crate::config::Config;
use crate::db::{self, InMemoryStore, PgUniquenessStore, UniquenessStore};
use crate::engine::Engine;
use crate::error::AppResult;
use crate::messages::{LocaleCatalog, MessageResolver};
use crate::requests::RequestCatalog;
use crate::rules::RuleRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    engine: Engine,
    catalog: RequestCatalog,
    permissions: Arc<dyn CapabilityChecker>,
    resolver: MessageResolver,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        engine: Engine,
        catalog: RequestCatalog,
        permissions: Arc<dyn CapabilityChecker>,
        resolver: MessageResolver,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                engine,
                catalog,
                permissions,
                resolver,
            }),
        }
    }

    /// Connect the store and build the request catalog from configuration
    pub async fn bootstrap(config: &Config) -> AppResult<Self> {
        let store: Arc<dyn UniquenessStore> = match &config.database {
            Some(database) => {
                info!("Connecting to database...");
                let pool = db::create_pool(database).await?;
                db::test_connection(&pool).await?;
                info!(
                    max_connections = database.max_connections,
                    "Database connection established"
                );
                Arc::new(PgUniquenessStore::new(pool, config.store.query_timeout()))
            }
            None => {
                warn!("DATABASE_URL not set, unique and exists rules use an empty in-memory store");
                Arc::new(InMemoryStore::new())
            }
        };

        let registry = RuleRegistry::builtin();
        let mut catalog = RequestCatalog::builtin(&registry)?;
        if let Some(path) = &config.requests_path {
            catalog.load_file(path, &registry)?;
        }
        info!(requests = catalog.len(), "Request catalog built");

        let locales = LocaleCatalog::builtin(config.validation.default_locale.clone());
        if !locales.has_locale(&config.validation.default_locale) {
            warn!(
                locale = %config.validation.default_locale,
                "No generic messages for the default locale"
            );
        }

        let engine = Engine::new(store, config.engine_options());

        Ok(Self::new(
            engine,
            catalog,
            Arc::new(StaticPermissions::seeded()),
            MessageResolver::new(locales),
        ))
    }

    pub fn engine(&self) -> &Engine {
        &self.inner.engine
    }

    pub fn catalog(&self) -> &RequestCatalog {
        &self.inner.catalog
    }

    pub fn permissions(&self) -> &dyn CapabilityChecker {
        self.inner.permissions.as_ref()
    }

    pub fn resolver(&self) -> &MessageResolver {
        &self.inner.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_without_database() {
        let config = Config::from_lookup(|_| None).unwrap();
        let state = AppState::bootstrap(&config).await.unwrap();

        assert!(state.catalog().get("users.store").is_ok());
        assert_eq!(state.resolver().default_locale(), "id");
    }
}
