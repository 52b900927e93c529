//! Health and diagnostics response shapes

use serde::Serialize;

/// Fixed API version reported by health checks
pub const API_VERSION: &str = "1.0.0";

/// Whether a store handle was constructed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseAvailability {
    Available,
    Unavailable,
}

/// GET /api/health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: DatabaseAvailability,
    pub version: &'static str,
}

/// GET /test response.
///
/// Every field is filled in by an independent check; a failing check only
/// changes its own fields.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub active_database: Option<String>,
    pub collections: Vec<String>,
}
