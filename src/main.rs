//! FleetGate Server — API gateway for the fleet administration platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use fleetgate_core::config::AppConfig;
use fleetgate_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("FLEETGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FleetGate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = fleetgate_database::DatabasePool::connect(&config.database).await?;
    fleetgate_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let subject_repo = Arc::new(
        fleetgate_database::repositories::subject::SubjectRepository::new(db.pool().clone()),
    );
    let session_repo = Arc::new(
        fleetgate_database::repositories::session::SessionRepository::new(db.pool().clone()),
    );
    let permission_repo = Arc::new(
        fleetgate_database::repositories::permission::RolePermissionRepository::new(
            db.pool().clone(),
        ),
    );

    // ── Step 3: Auth system ──────────────────────────────────────
    let password_hasher = Arc::new(fleetgate_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(fleetgate_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(fleetgate_auth::jwt::JwtDecoder::new(&config.auth));

    let token_service = Arc::new(fleetgate_auth::session::TokenService::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        subject_repo,
        session_repo,
        password_hasher,
        &config.auth,
    ));

    let cache = Arc::new(fleetgate_cache::MemoryCacheProvider::default());
    let rbac = Arc::new(fleetgate_auth::rbac::RbacEvaluator::new(
        permission_repo,
        cache,
        Duration::from_secs(config.auth.permission_cache_ttl_seconds),
    ));
    let scope = Arc::new(fleetgate_auth::scope::ScopeResolver::new());

    // ── Step 4: Gateway ──────────────────────────────────────────
    let route_table = Arc::new(fleetgate_gateway::route::RouteTable::from_config(
        &config.gateway,
    ));
    let forwarder = Arc::new(fleetgate_gateway::proxy::ProxyForwarder::new(
        &config.gateway,
    )?);
    tracing::info!(routes = route_table.len(), "Gateway route table loaded");

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = fleetgate_api::state::AppState {
        config: Arc::new(config.clone()),
        token_service,
        rbac,
        scope,
        route_table,
        forwarder,
    };

    let app = fleetgate_api::router::build_router(app_state)
        .into_make_service_with_connect_info::<std::net::SocketAddr>();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FleetGate listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("FleetGate shut down gracefully");
    db.close().await;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
