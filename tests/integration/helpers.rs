//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use fleetgate_api::state::AppState;
use fleetgate_auth::jwt::{JwtDecoder, JwtEncoder};
use fleetgate_auth::password::PasswordHasher;
use fleetgate_auth::rbac::{MemoryPermissionStore, RbacEvaluator};
use fleetgate_auth::scope::ScopeResolver;
use fleetgate_auth::session::{MemorySessionStore, MemorySubjectStore, TokenService};
use fleetgate_cache::MemoryCacheProvider;
use fleetgate_core::config::app::CorsConfig;
use fleetgate_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, GatewayConfig, LoggingConfig, RouteConfig, ServerConfig,
};
use fleetgate_entity::permission::Permission;
use fleetgate_entity::subject::{RoleName, SubjectAccount};
use fleetgate_gateway::proxy::ProxyForwarder;
use fleetgate_gateway::route::RouteTable;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Subject store for seeding accounts
    pub subjects: Arc<MemorySubjectStore>,
    /// Permission store for seeding grants
    pub permissions: Arc<MemoryPermissionStore>,
    /// Password hasher shared with the token service
    hasher: Arc<PasswordHasher>,
}

impl TestApp {
    /// Create a test application with the given gateway routes, backed by
    /// in-memory stores.
    pub fn with_routes(routes: Vec<RouteConfig>) -> Self {
        let config = test_config(routes);

        let hasher = Arc::new(PasswordHasher::new());
        let subjects = Arc::new(MemorySubjectStore::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let permissions = Arc::new(MemoryPermissionStore::new());

        let token_service = Arc::new(TokenService::new(
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
            Arc::clone(&subjects) as Arc<dyn fleetgate_auth::session::SubjectStore>,
            Arc::clone(&sessions) as Arc<dyn fleetgate_auth::session::SessionStore>,
            Arc::clone(&hasher),
            &config.auth,
        ));

        let rbac = Arc::new(RbacEvaluator::new(
            Arc::clone(&permissions) as Arc<dyn fleetgate_auth::rbac::PermissionStore>,
            Arc::new(MemoryCacheProvider::default()),
            Duration::from_secs(config.auth.permission_cache_ttl_seconds),
        ));

        let route_table = Arc::new(RouteTable::from_config(&config.gateway));
        let forwarder = Arc::new(ProxyForwarder::new(&config.gateway).expect("forwarder"));

        let state = AppState {
            config: Arc::new(config),
            token_service,
            rbac,
            scope: Arc::new(ScopeResolver::new()),
            route_table,
            forwarder,
        };

        Self {
            router: fleetgate_api::router::build_router(state),
            subjects,
            permissions,
            hasher,
        }
    }

    /// Create a test application with no gateway routes.
    pub fn new() -> Self {
        Self::with_routes(Vec::new())
    }

    /// Seed a subject account and return its ID.
    pub fn create_subject(
        &self,
        email: &str,
        password: &str,
        roles: Vec<RoleName>,
        team_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.subjects.insert(SubjectAccount {
            id,
            email: email.into(),
            password_hash: self.hasher.hash_password(password).expect("hash"),
            roles,
            team_id,
            department_id: None,
            active: true,
            created_at: chrono::Utc::now(),
        });
        id
    }

    /// Grant a permission to a role.
    pub fn grant(&self, role: RoleName, resource: &str, action: &str) {
        self.permissions
            .grant(role, Permission::new(resource, action));
    }

    /// Login and return the (access, refresh) token pair.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let data = response.body.get("data").expect("data in login response");
        (
            data.get("access_token")
                .and_then(|v| v.as_str())
                .expect("access_token")
                .to_string(),
            data.get("refresh_token")
                .and_then(|v| v.as_str())
                .expect("refresh_token")
                .to_string(),
        )
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a raw request (for tests that set custom headers).
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            raw_body: body_bytes.to_vec(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (Null when not JSON)
    pub body: Value,
    /// Raw response bytes
    pub raw_body: Vec<u8>,
}

impl TestResponse {
    /// The `code` field of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body
            .get("code")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }
}

/// Spawn a mock downstream service on an ephemeral port and return its base
/// URL.
pub async fn spawn_downstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind downstream");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("serve downstream");
    });

    format!("http://{addr}")
}

/// A gateway route entry for tests. Auth is required by default, matching
/// production routes; tests flip the flags they exercise.
pub fn route(prefix: &str, upstream: &str) -> RouteConfig {
    RouteConfig {
        prefix: prefix.into(),
        upstream: upstream.into(),
        rewrite: Default::default(),
        requires_auth: true,
        resource: None,
        team_scoped: false,
    }
}

fn test_config(routes: Vec<RouteConfig>) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_bytes: 1024 * 1024,
            shutdown_grace_seconds: 1,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".into(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            validation_leeway_seconds: 5,
            permission_cache_ttl_seconds: 5,
        },
        gateway: GatewayConfig {
            request_timeout_seconds: 2,
            routes,
        },
        logging: LoggingConfig::default(),
    }
}
