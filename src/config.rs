//! Engine configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the engine runs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use validator::Validate;

use crate::constants::{
    DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_LOCALE,
    DEFAULT_STORE_QUERY_TIMEOUT_MS,
};
use crate::engine::{BooleanPolicy, EngineOptions, FailureMode, LengthPolicy};

/// Main configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub validation: ValidationConfig,
    /// Absent when no `DATABASE_URL` is set; the in-memory store is used instead.
    pub database: Option<DatabaseConfig>,
    pub store: StoreConfig,
    pub log: LogConfig,
    /// Optional JSON file with additional request definitions
    pub requests_path: Option<PathBuf>,
}

/// Validation engine behaviour
#[derive(Debug, Clone, Validate)]
pub struct ValidationConfig {
    #[validate(length(min = 2, max = 16))]
    pub default_locale: String,
    pub failure_mode: FailureMode,
    pub stop_on_first_failure: bool,
    pub boolean_policy: BooleanPolicy,
    pub length_policy: LengthPolicy,
}

/// Database configuration
#[derive(Debug, Clone, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(range(min = 1, max = 1000))]
    pub max_connections: u32,
    #[validate(range(min = 1))]
    pub acquire_timeout_secs: u64,
}

/// External store access configuration
#[derive(Debug, Clone, Validate)]
pub struct StoreConfig {
    #[validate(range(min = 1))]
    pub query_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            validation: ValidationConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            store: StoreConfig::from_lookup(&lookup)?,
            log: LogConfig {
                rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            },
            requests_path: lookup("THEMIS_REQUESTS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };

        config
            .validation
            .validate()
            .map_err(|e| ConfigError::InvalidValue(format!("THEMIS_DEFAULT_LOCALE ({e})")))?;
        if let Some(database) = &config.database {
            database
                .validate()
                .map_err(|e| ConfigError::InvalidValue(format!("DATABASE_* ({e})")))?;
        }
        config
            .store
            .validate()
            .map_err(|e| ConfigError::InvalidValue(format!("STORE_QUERY_TIMEOUT_MS ({e})")))?;

        Ok(config)
    }

    /// Engine options derived from the validation settings
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            failure_mode: self.validation.failure_mode,
            stop_on_first_failure: self.validation.stop_on_first_failure,
            boolean_policy: self.validation.boolean_policy,
            length_policy: self.validation.length_policy,
        }
    }
}

impl ValidationConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let accept_tokens: bool = parse_or(lookup, "THEMIS_BOOLEAN_TOKENS", true)?;

        Ok(Self {
            default_locale: lookup("THEMIS_DEFAULT_LOCALE")
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            failure_mode: parse_or(lookup, "THEMIS_FAILURE_MODE", FailureMode::CollectAll)?,
            stop_on_first_failure: parse_or(lookup, "THEMIS_STOP_ON_FIRST_FAILURE", false)?,
            boolean_policy: if accept_tokens {
                BooleanPolicy::AcceptTokens
            } else {
                BooleanPolicy::Strict
            },
            length_policy: parse_or(lookup, "THEMIS_LENGTH_POLICY", LengthPolicy::Stringify)?,
        })
    }
}

impl DatabaseConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };

        Ok(Some(Self {
            url,
            max_connections: parse_or(
                lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            acquire_timeout_secs: parse_or(
                lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS,
            )?,
        }))
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl StoreConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            query_timeout_ms: parse_or(
                lookup,
                "STORE_QUERY_TIMEOUT_MS",
                DEFAULT_STORE_QUERY_TIMEOUT_MS,
            )?,
        })
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
