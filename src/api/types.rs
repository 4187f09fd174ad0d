//! REST API response types and header values

use serde::Serialize;

/// Shared-cache policy for successful macro responses
pub const CACHE_POLICY: &str = "s-maxage=14400, stale-while-revalidate=86400";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Health check body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub sources: Vec<String>,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok(sources: Vec<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sources,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
