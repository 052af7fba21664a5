//! Per-invocation validation context

use serde::{Deserialize, Serialize};

/// Values a rule set may depend on besides the record itself.
///
/// Always passed explicitly into validation; rules never reach into
/// ambient request state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Identifier of the record being updated, excluded from uniqueness checks
    pub exclude_id: Option<i64>,
    /// Preferred locale for rendered messages
    pub locale: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for an update of the record with the given id
    pub fn for_update(id: i64) -> Self {
        Self {
            exclude_id: Some(id),
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}
