//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fleetgate_core::error::{AppError, ErrorKind};
use fleetgate_core::types::response::ErrorEnvelope;

/// Response-side wrapper for [`AppError`].
///
/// Handlers return `Result<_, ApiError>`; the `From` impl lets domain
/// errors propagate with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind: 401 for token issues, 403 for
/// permission/scope, 404 for missing routes, 502/504 for gateway
/// unavailability, 409 for conflicts.
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidCredentials
        | ErrorKind::InvalidToken
        | ErrorKind::TokenExpired
        | ErrorKind::ReplayDetected => StatusCode::UNAUTHORIZED,
        ErrorKind::InsufficientPermissions | ErrorKind::TeamAccessDenied => StatusCode::FORBIDDEN,
        ErrorKind::RouteNotFound => StatusCode::NOT_FOUND,
        ErrorKind::GatewayUnavailable => StatusCode::BAD_GATEWAY,
        ErrorKind::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "Internal server error");
        }

        let body = ErrorEnvelope::new(self.0.message.clone(), self.0.kind.to_string());
        (status, Json(body)).into_response()
    }
}
