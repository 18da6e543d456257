//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use fleetgate_auth::rbac::RbacEvaluator;
use fleetgate_auth::scope::ScopeResolver;
use fleetgate_auth::session::TokenService;
use fleetgate_core::config::AppConfig;
use fleetgate_gateway::proxy::ProxyForwarder;
use fleetgate_gateway::route::RouteTable;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Credential & token service.
    pub token_service: Arc<TokenService>,
    /// RBAC evaluator.
    pub rbac: Arc<RbacEvaluator>,
    /// Organizational scope resolver.
    pub scope: Arc<ScopeResolver>,
    /// Immutable gateway route table.
    pub route_table: Arc<RouteTable>,
    /// Downstream forwarder.
    pub forwarder: Arc<ProxyForwarder>,
}
