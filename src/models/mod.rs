//! Domain models
//!
//! Records under validation, the per-call validation context and the
//! acting principal.

pub mod context;
pub mod principal;

pub use context::ValidationContext;
pub use principal::Principal;

use serde_json::{Map, Value};

/// A record under validation: field name to JSON value.
///
/// A field is absent when its key is missing; present-but-empty when it
/// holds `null` or a blank string.
pub type Record = Map<String, Value>;

/// Interpret a JSON document as a record; only objects qualify.
pub fn record_from_value(value: Value) -> Option<Record> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
