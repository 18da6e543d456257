//! Gateway routing table and forwarding configuration.
//!
//! Downstream services are addressed only through this table; request
//! handlers never hard-code a base URL. The table is loaded once at startup
//! and treated as immutable for the process lifetime.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Gateway forwarding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Per-request downstream timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Ordered route table. Longest prefix wins regardless of file order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A single gateway route entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Inbound path prefix, e.g. `/api/vehicles`.
    pub prefix: String,
    /// Downstream base URL, e.g. `http://vehicle-service:7005`.
    pub upstream: String,
    /// Rewrite rule applied to the matched path before forwarding.
    #[serde(default)]
    pub rewrite: RewriteRule,
    /// Whether a verified access token is required before forwarding.
    #[serde(default = "default_true")]
    pub requires_auth: bool,
    /// RBAC resource name checked against the subject's permissions.
    /// `None` skips the permission check (e.g. the auth service itself).
    #[serde(default)]
    pub resource: Option<String>,
    /// Whether the route targets team-scoped resources; enables the
    /// organizational scope check.
    #[serde(default)]
    pub team_scoped: bool,
}

/// How the matched prefix is transformed into the downstream path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum RewriteRule {
    /// Forward the inbound path unchanged.
    #[default]
    Keep,
    /// Remove the matched prefix, forwarding only the remainder.
    StripPrefix,
    /// Replace the matched prefix with a different downstream prefix.
    Replace(String),
}

impl GatewayConfig {
    /// Validate the route table: non-empty prefixes, absolute upstream URLs,
    /// and no duplicate prefixes (duplicates would make longest-prefix
    /// matching nondeterministic).
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen = std::collections::HashSet::new();
        for route in &self.routes {
            if !route.prefix.starts_with('/') {
                return Err(AppError::configuration(format!(
                    "Route prefix '{}' must start with '/'",
                    route.prefix
                )));
            }
            if !route.upstream.starts_with("http://") && !route.upstream.starts_with("https://") {
                return Err(AppError::configuration(format!(
                    "Route upstream '{}' must be an absolute http(s) URL",
                    route.upstream
                )));
            }
            if !seen.insert(route.prefix.as_str()) {
                return Err(AppError::configuration(format!(
                    "Duplicate route prefix '{}'",
                    route.prefix
                )));
            }
        }
        Ok(())
    }
}

fn default_request_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}
