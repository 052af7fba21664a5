//! Themis - Declarative Field Validation
//!
//! This library validates flat records (JSON objects from form or API
//! submissions) against named rule sets and reports every failing field
//! with localized, human-readable messages.
//!
//! # Features
//!
//! - Laravel-style rule chains (`sometimes|required|string|max:255`)
//! - Uniqueness and existence checks against Postgres or an in-memory store
//! - Per-request custom messages and attribute labels
//! - Capability checks before any rule runs
//!
//! # Architecture
//!
//! - **Rules**: declaration parsing, compilation and atom evaluation
//! - **Engine**: runs a compiled rule set over one record
//! - **Messages**: renders failures into text
//! - **Requests**: named rule sets with their messages and capability
//! - **Services**: request-level workflows over the shared state

pub mod authorization;
pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod messages;
pub mod models;
pub mod requests;
pub mod rules;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Engine, EngineOptions, ValidationResult};
pub use error::{AppError, AppResult};
pub use models::{Principal, Record, ValidationContext};
pub use rules::{RuleRegistry, RuleSet, RuleSetDeclaration, compile};
pub use state::AppState;
