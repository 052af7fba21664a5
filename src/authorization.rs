//! Capability checks performed before a request is validated
//!
//! The engine never looks at who submitted a record. The validation
//! service asks a [`CapabilityChecker`] first and refuses the request
//! outright when the principal lacks the capability.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::constants::{capabilities, roles};
use crate::error::{AppError, AppResult};
use crate::models::Principal;

/// Answers whether a principal holds a capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    async fn can(&self, principal: &Principal, capability: &str) -> bool;
}

/// Role-based permissions held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    grants: HashMap<String, HashSet<String>>,
}

impl StaticPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `role` every capability in `capabilities`
    pub fn grant<I, S>(mut self, role: impl Into<String>, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants
            .entry(role.into())
            .or_default()
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    /// The warehouse roles: supervisors hold everything, team leads manage
    /// inventory, staff handle day-to-day placement
    pub fn seeded() -> Self {
        use capabilities::*;

        Self::new()
            .grant(roles::SUPERVISOR, capabilities::ALL.iter().copied())
            .grant(
                roles::LEADER_PAKET,
                [
                    GUDANG_VIEW,
                    AREA_GUDANG_VIEW,
                    AREA_GUDANG_CREATE,
                    AREA_GUDANG_UPDATE,
                    KATEGORI_BARANG_VIEW,
                    KATEGORI_BARANG_CREATE,
                    KATEGORI_BARANG_UPDATE,
                    BARANG_VIEW,
                    BARANG_CREATE,
                    BARANG_UPDATE,
                    BARANG_SCAN,
                    PENEMPATAN_BARANG_VIEW,
                    PENEMPATAN_BARANG_CREATE,
                    PENEMPATAN_BARANG_UPDATE,
                    OPTIMASI_VIEW,
                    OPTIMASI_RUN,
                    REKOMENDASI_VIEW,
                    REKOMENDASI_APPROVE,
                    REKOMENDASI_REJECT,
                    LAPORAN_VIEW,
                    ANALYTICS_VIEW,
                    DASHBOARD_VIEW,
                    LOG_AKTIVITAS_VIEW,
                ],
            )
            .grant(
                roles::GUDANG,
                [
                    AREA_GUDANG_VIEW,
                    KATEGORI_BARANG_VIEW,
                    BARANG_VIEW,
                    BARANG_SCAN,
                    PENEMPATAN_BARANG_VIEW,
                    PENEMPATAN_BARANG_CREATE,
                    PENEMPATAN_BARANG_UPDATE,
                    REKOMENDASI_VIEW,
                    REKOMENDASI_IMPLEMENT,
                    DASHBOARD_VIEW,
                ],
            )
    }

    pub fn role_can(&self, role: &str, capability: &str) -> bool {
        self.grants
            .get(role)
            .is_some_and(|granted| granted.contains(capability))
    }
}

#[async_trait]
impl CapabilityChecker for StaticPermissions {
    async fn can(&self, principal: &Principal, capability: &str) -> bool {
        self.grants
            .keys()
            .any(|role| principal.has_role(role) && self.role_can(role, capability))
    }
}

/// Fail with `AuthorizationDenied` unless the principal holds `capability`
pub async fn require_capability(
    checker: &dyn CapabilityChecker,
    principal: &Principal,
    capability: &str,
) -> AppResult<()> {
    if checker.can(principal, capability).await {
        debug!(principal = principal.id, capability, "Capability granted");
        Ok(())
    } else {
        warn!(
            principal = principal.id,
            roles = ?principal.roles,
            capability,
            "Authorization denied"
        );
        Err(AppError::AuthorizationDenied(capability.to_string()))
    }
}
