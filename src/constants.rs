//! Application-wide constants
//!
//! This module contains all constant values used throughout the engine.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// VALIDATION DEFAULTS
// =============================================================================

/// Default locale for generic fallback messages
pub const DEFAULT_LOCALE: &str = "id";

/// Suffix of the sibling field checked by the `confirmed` rule
pub const CONFIRMATION_SUFFIX: &str = "_confirmation";

/// Placeholder resolved from the validation context's excluded record id
pub const EXCLUDE_ID_PLACEHOLDER: &str = "{exclude_id}";

/// Default identifier column used when excluding a record from a uniqueness check
pub const DEFAULT_ID_COLUMN: &str = "id";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection, in seconds
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Default upper bound for a single existence query, in milliseconds
pub const DEFAULT_STORE_QUERY_TIMEOUT_MS: u64 = 2000;

// =============================================================================
// DOMAIN TABLES
// =============================================================================

/// Table and column names referenced by the built-in request definitions
pub mod tables {
    pub const USERS: &str = "users";
    pub const GUDANG: &str = "gudang";
    pub const BARANG: &str = "barang";
    pub const KATEGORI_BARANG: &str = "kategori_barang";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const SUPERVISOR: &str = "supervisor";
    pub const LEADER_PAKET: &str = "leader-paket";
    pub const GUDANG: &str = "gudang";

    /// All assignable roles
    pub const ALL: &[&str] = &[SUPERVISOR, LEADER_PAKET, GUDANG];
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Capability names checked before a request is validated
pub mod capabilities {
    pub const USERS_VIEW: &str = "users.view";
    pub const USERS_CREATE: &str = "users.create";
    pub const USERS_UPDATE: &str = "users.update";
    pub const USERS_DELETE: &str = "users.delete";

    pub const GUDANG_VIEW: &str = "gudang.view";
    pub const GUDANG_CREATE: &str = "gudang.create";
    pub const GUDANG_UPDATE: &str = "gudang.update";
    pub const GUDANG_DELETE: &str = "gudang.delete";

    pub const AREA_GUDANG_VIEW: &str = "area-gudang.view";
    pub const AREA_GUDANG_CREATE: &str = "area-gudang.create";
    pub const AREA_GUDANG_UPDATE: &str = "area-gudang.update";
    pub const AREA_GUDANG_DELETE: &str = "area-gudang.delete";

    pub const KATEGORI_BARANG_VIEW: &str = "kategori-barang.view";
    pub const KATEGORI_BARANG_CREATE: &str = "kategori-barang.create";
    pub const KATEGORI_BARANG_UPDATE: &str = "kategori-barang.update";
    pub const KATEGORI_BARANG_DELETE: &str = "kategori-barang.delete";

    pub const BARANG_VIEW: &str = "barang.view";
    pub const BARANG_CREATE: &str = "barang.create";
    pub const BARANG_UPDATE: &str = "barang.update";
    pub const BARANG_DELETE: &str = "barang.delete";
    pub const BARANG_SCAN: &str = "barang.scan";

    pub const PENEMPATAN_BARANG_VIEW: &str = "penempatan-barang.view";
    pub const PENEMPATAN_BARANG_CREATE: &str = "penempatan-barang.create";
    pub const PENEMPATAN_BARANG_UPDATE: &str = "penempatan-barang.update";
    pub const PENEMPATAN_BARANG_DELETE: &str = "penempatan-barang.delete";

    pub const OPTIMASI_VIEW: &str = "optimasi.view";
    pub const OPTIMASI_RUN: &str = "optimasi.run";
    pub const OPTIMASI_HISTORY: &str = "optimasi.history";

    pub const REKOMENDASI_VIEW: &str = "rekomendasi.view";
    pub const REKOMENDASI_APPROVE: &str = "rekomendasi.approve";
    pub const REKOMENDASI_REJECT: &str = "rekomendasi.reject";
    pub const REKOMENDASI_IMPLEMENT: &str = "rekomendasi.implement";

    pub const LAPORAN_VIEW: &str = "laporan.view";
    pub const ANALYTICS_VIEW: &str = "analytics.view";
    pub const DASHBOARD_VIEW: &str = "dashboard.view";
    pub const LOG_AKTIVITAS_VIEW: &str = "log-aktivitas.view";

    /// Every known capability
    pub const ALL: &[&str] = &[
        USERS_VIEW,
        USERS_CREATE,
        USERS_UPDATE,
        USERS_DELETE,
        GUDANG_VIEW,
        GUDANG_CREATE,
        GUDANG_UPDATE,
        GUDANG_DELETE,
        AREA_GUDANG_VIEW,
        AREA_GUDANG_CREATE,
        AREA_GUDANG_UPDATE,
        AREA_GUDANG_DELETE,
        KATEGORI_BARANG_VIEW,
        KATEGORI_BARANG_CREATE,
        KATEGORI_BARANG_UPDATE,
        KATEGORI_BARANG_DELETE,
        BARANG_VIEW,
        BARANG_CREATE,
        BARANG_UPDATE,
        BARANG_DELETE,
        BARANG_SCAN,
        PENEMPATAN_BARANG_VIEW,
        PENEMPATAN_BARANG_CREATE,
        PENEMPATAN_BARANG_UPDATE,
        PENEMPATAN_BARANG_DELETE,
        OPTIMASI_VIEW,
        OPTIMASI_RUN,
        OPTIMASI_HISTORY,
        REKOMENDASI_VIEW,
        REKOMENDASI_APPROVE,
        REKOMENDASI_REJECT,
        REKOMENDASI_IMPLEMENT,
        LAPORAN_VIEW,
        ANALYTICS_VIEW,
        DASHBOARD_VIEW,
        LOG_AKTIVITAS_VIEW,
    ];
}

// =============================================================================
// REQUEST NAMES
// =============================================================================

/// Names of the built-in request definitions
pub mod requests {
    pub const USERS_STORE: &str = "users.store";
    pub const USERS_UPDATE: &str = "users.update";
    pub const GUDANG_STORE: &str = "gudang.store";
    pub const GUDANG_UPDATE: &str = "gudang.update";
    pub const BARANG_STORE: &str = "barang.store";
    pub const BARANG_UPDATE: &str = "barang.update";
    pub const KATEGORI_BARANG_STORE: &str = "kategori_barang.store";
}

/// Candidate values for `barang.prioritas`
pub mod priorities {
    pub const ALL: &[&str] = &["rendah", "sedang", "tinggi"];
}
