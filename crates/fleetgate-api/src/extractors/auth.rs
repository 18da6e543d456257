//! `AuthSubject` extractor — pulls the bearer token from the Authorization
//! header, verifies it, and injects the authenticated principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use fleetgate_core::error::AppError;
use fleetgate_entity::subject::Subject;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated subject available in handlers.
#[derive(Debug, Clone)]
pub struct AuthSubject(pub Subject);

impl std::ops::Deref for AuthSubject {
    type Target = Subject;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthSubject {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let subject = subject_from_headers(&parts.headers, state)?;
        Ok(AuthSubject(subject))
    }
}

/// Shared bearer-token verification used by the extractor and the gateway
/// fallback handler.
pub fn subject_from_headers(
    headers: &axum::http::HeaderMap,
    state: &AppState,
) -> Result<Subject, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::invalid_token("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization header format"))?;

    state.token_service.verify(token)
}
