//! Integration tests for gateway routing, authorization, and relaying,
//! against live mock downstream services.

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use http::StatusCode;
use uuid::Uuid;

use fleetgate_entity::subject::RoleName;

use crate::helpers::{TestApp, route, spawn_downstream};

/// Downstream that answers every request with a fixed status and body.
fn fixed_response(status: StatusCode, body: &'static str) -> Router {
    Router::new().fallback(move || async move {
        (status, [("content-type", "application/json")], body)
    })
}

/// Downstream that echoes the request line and selected headers as JSON.
fn echo_router() -> Router {
    Router::new().fallback(|req: Request| async move {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(serde_json::json!({
            "method": req.method().as_str(),
            "path": req.uri().path(),
            "query": req.uri().query(),
            "authorization": header("authorization"),
            "cookie": header("cookie"),
            "x-forwarded-proto": header("x-forwarded-proto"),
            "x-forwarded-host": header("x-forwarded-host"),
        }))
    })
}

#[tokio::test]
async fn test_downstream_404_relayed_verbatim() {
    let upstream = spawn_downstream(fixed_response(StatusCode::NOT_FOUND, r#"{"error":"x"}"#)).await;

    let mut vehicle_route = route("/api/vehicles", &upstream);
    vehicle_route.requires_auth = false;
    let app = TestApp::with_routes(vec![vehicle_route]);

    let response = app.request("GET", "/api/vehicles/9", None, None).await;

    // Not reinterpreted: the downstream 404 and its exact body pass through.
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.raw_body, br#"{"error":"x"}"#.to_vec());
}

#[tokio::test]
async fn test_downstream_500_relayed_verbatim() {
    let upstream = spawn_downstream(fixed_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"success":false,"message":"boom","code":"INTERNAL"}"#,
    ))
    .await;

    let mut order_route = route("/api/orders", &upstream);
    order_route.requires_auth = false;
    let app = TestApp::with_routes(vec![order_route]);

    let response = app.request("POST", "/api/orders", None, None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), "INTERNAL");
}

#[tokio::test]
async fn test_unmatched_path_is_route_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/nowhere", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
    assert_eq!(response.body.get("success").unwrap().as_bool(), Some(false));
}

#[tokio::test]
async fn test_unreachable_downstream_is_gateway_unavailable() {
    // Bind and immediately drop a listener to get a port nothing serves.
    let dead_port = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut dead_route = route("/api/riders", &format!("http://127.0.0.1:{dead_port}"));
    dead_route.requires_auth = false;
    let app = TestApp::with_routes(vec![dead_route]);

    let response = app.request("GET", "/api/riders", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.error_code(), "GATEWAY_UNAVAILABLE");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let upstream = spawn_downstream(echo_router()).await;
    let app = TestApp::with_routes(vec![route("/api/vehicles", &upstream)]);

    let response = app.request("GET", "/api/vehicles", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/vehicles", None, Some("garbage-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "InvalidToken");
}

#[tokio::test]
async fn test_rbac_enforced_before_forwarding() {
    let upstream = spawn_downstream(echo_router()).await;

    let mut vehicle_route = route("/api/vehicles", &upstream);
    vehicle_route.resource = Some("vehicles".into());
    let app = TestApp::with_routes(vec![vehicle_route]);

    app.create_subject("tech@x.com", "pw", vec![RoleName::Technician], None);
    app.grant(RoleName::Technician, "vehicles", "read");

    let (access, _) = app.login("tech@x.com", "pw").await;

    // Granted action forwards and reaches the downstream.
    let response = app
        .request("GET", "/api/vehicles/7?fields=vin", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("path").unwrap().as_str().unwrap(),
        "/api/vehicles/7"
    );
    assert_eq!(
        response.body.get("query").unwrap().as_str().unwrap(),
        "fields=vin"
    );

    // Ungranted action on the same resource is refused at the gateway.
    let response = app
        .request("DELETE", "/api/vehicles/7", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "InsufficientPermissions");
}

#[tokio::test]
async fn test_super_admin_needs_no_explicit_grant() {
    let upstream = spawn_downstream(echo_router()).await;

    let mut vehicle_route = route("/api/vehicles", &upstream);
    vehicle_route.resource = Some("vehicles".into());
    let app = TestApp::with_routes(vec![vehicle_route]);

    app.create_subject("root@x.com", "pw", vec![RoleName::SuperAdmin], None);
    let (access, _) = app.login("root@x.com", "pw").await;

    let response = app
        .request("DELETE", "/api/vehicles/7", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_team_scope_enforced() {
    let upstream = spawn_downstream(echo_router()).await;

    let mut rider_route = route("/api/riders", &upstream);
    rider_route.resource = Some("riders".into());
    rider_route.team_scoped = true;
    let app = TestApp::with_routes(vec![rider_route]);

    let own_team = Uuid::new_v4();
    let other_team = Uuid::new_v4();

    app.create_subject(
        "dispatch@x.com",
        "pw",
        vec![RoleName::Dispatcher],
        Some(own_team),
    );
    app.grant(RoleName::Dispatcher, "riders", "read");
    let (access, _) = app.login("dispatch@x.com", "pw").await;

    let get = |team: Option<Uuid>, token: String| {
        let mut builder = http::Request::builder()
            .method("GET")
            .uri("/api/riders")
            .header("Authorization", format!("Bearer {token}"));
        if let Some(team) = team {
            builder = builder.header("x-team-id", team.to_string());
        }
        builder.body(Body::empty()).unwrap()
    };

    // Own team passes.
    let response = app.send(get(Some(own_team), access.clone())).await;
    assert_eq!(response.status, StatusCode::OK);

    // Another team's scope is denied despite the resource permission.
    let response = app.send(get(Some(other_team), access.clone())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "TeamAccessDenied");

    // No team scope on the request fails closed.
    let response = app.send(get(None, access.clone())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "TeamAccessDenied");
}

#[tokio::test]
async fn test_team_scope_denied_without_team_claim() {
    let upstream = spawn_downstream(echo_router()).await;

    let mut rider_route = route("/api/riders", &upstream);
    rider_route.resource = Some("riders".into());
    rider_route.team_scoped = true;
    let app = TestApp::with_routes(vec![rider_route]);

    // Resource permission alone is not enough: no team claim, no bypass.
    app.create_subject("floating@x.com", "pw", vec![RoleName::Dispatcher], None);
    app.grant(RoleName::Dispatcher, "riders", "read");
    let (access, _) = app.login("floating@x.com", "pw").await;

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/riders")
        .header("Authorization", format!("Bearer {access}"))
        .header("x-team-id", Uuid::new_v4().to_string())
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "TeamAccessDenied");
}

#[tokio::test]
async fn test_admin_bypasses_team_scope() {
    let upstream = spawn_downstream(echo_router()).await;

    let mut rider_route = route("/api/riders", &upstream);
    rider_route.resource = Some("riders".into());
    rider_route.team_scoped = true;
    let app = TestApp::with_routes(vec![rider_route]);

    app.create_subject("admin@x.com", "pw", vec![RoleName::Admin], None);
    app.grant(RoleName::Admin, "riders", "read");
    let (access, _) = app.login("admin@x.com", "pw").await;

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/riders")
        .header("Authorization", format!("Bearer {access}"))
        .header("x-team-id", Uuid::new_v4().to_string())
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_header_allowlist_and_forwarded_injection() {
    let upstream = spawn_downstream(echo_router()).await;

    let mut vehicle_route = route("/api/vehicles", &upstream);
    vehicle_route.requires_auth = false;
    let app = TestApp::with_routes(vec![vehicle_route]);

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/vehicles")
        .header("Authorization", "Bearer opaque")
        .header("Cookie", "session=secret")
        .header("Host", "gateway.test")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);

    // Allowlisted header crosses the boundary.
    assert_eq!(
        response.body.get("authorization").unwrap().as_str().unwrap(),
        "Bearer opaque"
    );
    // Cookies are not on the allowlist and never cross.
    assert!(response.body.get("cookie").unwrap().is_null());
    // x-forwarded-* injected by the gateway.
    assert_eq!(
        response
            .body
            .get("x-forwarded-proto")
            .unwrap()
            .as_str()
            .unwrap(),
        "http"
    );
    assert_eq!(
        response
            .body
            .get("x-forwarded-host")
            .unwrap()
            .as_str()
            .unwrap(),
        "gateway.test"
    );
}

#[tokio::test]
async fn test_specific_prefix_wins_over_generic() {
    let specific = spawn_downstream(fixed_response(StatusCode::OK, r#"{"service":"dispatch"}"#)).await;
    let generic = spawn_downstream(fixed_response(StatusCode::OK, r#"{"service":"orders"}"#)).await;

    // Generic listed first: resolution must still prefer the longer prefix.
    let mut generic_route = route("/api/orders", &generic);
    generic_route.requires_auth = false;
    let mut specific_route = route("/api/orders/dispatch", &specific);
    specific_route.requires_auth = false;

    let app = TestApp::with_routes(vec![generic_route, specific_route]);

    let response = app.request("GET", "/api/orders/dispatch/42", None, None).await;
    assert_eq!(
        response.body.get("service").unwrap().as_str().unwrap(),
        "dispatch"
    );

    let response = app.request("GET", "/api/orders/42", None, None).await;
    assert_eq!(
        response.body.get("service").unwrap().as_str().unwrap(),
        "orders"
    );
}
