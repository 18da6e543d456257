//! Health check handlers (no auth required).

use axum::Json;

use fleetgate_core::types::response::ApiResponse;

use crate::dto::response::HealthResponse;

/// GET /api/health
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
