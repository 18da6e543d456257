//! Gateway fallback handler — resolves the route, authorizes, and relays.
//!
//! Everything not matched by an explicit API route lands here. The
//! authorization performed before forwarding is a first line of defense:
//! downstream services verify the forwarded `Authorization` header
//! themselves, since they are also reachable directly in some deployment
//! topologies.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use fleetgate_core::error::AppError;
use fleetgate_gateway::proxy::InboundRequest;

use crate::error::ApiError;
use crate::extractors::auth::subject_from_headers;
use crate::state::AppState;

/// Fallback handler that proxies to the resolved downstream service.
pub async fn forward(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let route = state
        .route_table
        .resolve(&path)
        .ok_or_else(|| AppError::route_not_found(format!("No route for '{path}'")))?
        .clone();

    if route.requires_auth {
        let subject = subject_from_headers(request.headers(), &state)?;

        if let Some(resource) = &route.resource {
            let action = action_for_method(request.method());
            state.rbac.authorize(&subject, resource, &action).await?;
        }

        if route.team_scoped {
            let requested = requested_team(request.headers(), query.as_deref())?;
            state.scope.authorize_team(&subject, requested)?;
        }
    }

    let client_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string());
    let host = request
        .headers()
        .get("host")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let method = request.method().clone();
    let headers = request.headers().clone();

    let body = axum::body::to_bytes(request.into_body(), state.config.server.max_body_bytes)
        .await
        .map_err(|e| AppError::validation(format!("Failed to read request body: {e}")))?;

    let inbound = InboundRequest {
        method,
        path,
        query,
        headers,
        body,
        client_ip,
        host,
        scheme: "http".to_string(),
    };

    let relayed = state.forwarder.forward(&route, inbound).await?;

    // Verbatim relay: downstream status and body pass through unchanged,
    // whatever they were.
    Ok((relayed.status, relayed.headers, relayed.body).into_response())
}

/// Maps the HTTP method onto an RBAC action name.
fn action_for_method(method: &Method) -> String {
    match *method {
        Method::GET | Method::HEAD => "read".to_string(),
        Method::POST => "create".to_string(),
        Method::PUT | Method::PATCH => "update".to_string(),
        Method::DELETE => "delete".to_string(),
        // Anything exotic needs an explicit grant under its own name.
        _ => method.as_str().to_lowercase(),
    }
}

/// Extracts the requested team scope from the `x-team-id` header or the
/// `team_id` query parameter. Absence is `None`; the scope resolver fails
/// closed on it.
fn requested_team(headers: &HeaderMap, query: Option<&str>) -> Result<Option<Uuid>, AppError> {
    let raw = headers
        .get("x-team-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| query.and_then(|q| query_param(q, "team_id")));

    match raw {
        Some(raw) => raw
            .parse::<Uuid>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid team id '{raw}'"))),
        None => Ok(None),
    }
}

/// Finds a single query parameter value in a raw query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
