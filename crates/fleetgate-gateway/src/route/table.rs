//! Immutable route table with longest-prefix resolution.
//!
//! Routes with more specific prefixes must be evaluated before their less
//! specific containing prefixes, otherwise a specific endpoint is shadowed
//! by a generic catch-all. The table is therefore sorted by descending
//! prefix length at build time, making resolution order-independent of the
//! configuration file.

use fleetgate_core::config::{GatewayConfig, RewriteRule, RouteConfig};

/// A resolved gateway route.
#[derive(Debug, Clone)]
pub struct Route {
    /// Inbound path prefix.
    pub prefix: String,
    /// Downstream base URL.
    pub upstream: String,
    /// Path rewrite applied before forwarding.
    pub rewrite: RewriteRule,
    /// Whether a verified access token is required.
    pub requires_auth: bool,
    /// RBAC resource name, if the route is permission-checked.
    pub resource: Option<String>,
    /// Whether the organizational scope check applies.
    pub team_scoped: bool,
}

impl Route {
    fn from_config(config: &RouteConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            upstream: config.upstream.trim_end_matches('/').to_string(),
            rewrite: config.rewrite.clone(),
            requires_auth: config.requires_auth,
            resource: config.resource.clone(),
            team_scoped: config.team_scoped,
        }
    }

    /// Whether this route's prefix matches the inbound path. A prefix
    /// matches itself and any sub-path, but never a sibling that merely
    /// shares leading characters (`/api/vehicles` does not match
    /// `/api/vehicles2`).
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// The downstream path after applying the rewrite rule.
    pub fn downstream_path(&self, path: &str) -> String {
        let remainder = &path[self.prefix.len()..];
        match &self.rewrite {
            RewriteRule::Keep => path.to_string(),
            RewriteRule::StripPrefix => {
                if remainder.is_empty() {
                    "/".to_string()
                } else {
                    remainder.to_string()
                }
            }
            RewriteRule::Replace(new_prefix) => {
                format!("{}{remainder}", new_prefix.trim_end_matches('/'))
            }
        }
    }

    /// The full downstream URL for an inbound path and query string.
    pub fn downstream_url(&self, path: &str, query: Option<&str>) -> String {
        let downstream_path = self.downstream_path(path);
        match query {
            Some(query) if !query.is_empty() => {
                format!("{}{downstream_path}?{query}", self.upstream)
            }
            _ => format!("{}{downstream_path}", self.upstream),
        }
    }
}

/// The immutable route table. Built once at startup; never mutated
/// mid-request.
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Routes sorted by descending prefix length.
    routes: Vec<Route>,
}

impl RouteTable {
    /// Builds the table from validated configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut routes: Vec<Route> = config.routes.iter().map(Route::from_config).collect();
        // Longest prefix first. Ties cannot occur: duplicate prefixes are
        // rejected at config validation.
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    /// Resolves the route for an inbound path, longest prefix first.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
