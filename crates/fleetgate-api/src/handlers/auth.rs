//! Auth handlers — login, refresh, logout, logout-everywhere, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use fleetgate_core::error::AppError;
use fleetgate_core::types::response::ApiResponse;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{MessageResponse, RevokedResponse, SubjectResponse, TokenPairResponse};
use crate::error::ApiError;
use crate::extractors::AuthSubject;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pair = state.token_service.issue(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(pair.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    let pair = state.token_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(pair.into())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.token_service.logout(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// POST /api/auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthSubject,
) -> Result<Json<ApiResponse<RevokedResponse>>, ApiError> {
    let revoked = state
        .token_service
        .revoke_all(auth.id, "Logout everywhere")
        .await?;

    Ok(Json(ApiResponse::ok(RevokedResponse { revoked })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthSubject) -> Json<ApiResponse<SubjectResponse>> {
    Json(ApiResponse::ok(auth.0.into()))
}
