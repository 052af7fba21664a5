//! Acting principal

use serde::{Deserialize, Serialize};

/// The authenticated user on whose behalf a request is validated.
///
/// Authentication happens elsewhere; callers hand over the resolved
/// identity and role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(id: i64, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
