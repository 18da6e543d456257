//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Clock-skew leeway for token validation, in seconds.
    #[serde(default = "default_leeway")]
    pub validation_leeway_seconds: u64,
    /// TTL for cached role permission unions, in seconds. Staleness of
    /// role/permission data is bounded by this window; revocation state is
    /// never cached.
    #[serde(default = "default_permission_cache_ttl")]
    pub permission_cache_ttl_seconds: u64,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_leeway() -> u64 {
    5
}

fn default_permission_cache_ttl() -> u64 {
    5
}
