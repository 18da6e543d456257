//! Integration tests for the authentication flow.

use http::StatusCode;

use fleetgate_entity::subject::RoleName;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success_returns_token_pair() {
    let app = TestApp::new();
    let id = app.create_subject("admin@x.com", "P@ss1", vec![RoleName::Admin], None);

    let (access, refresh) = app.login("admin@x.com", "P@ss1").await;
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());

    // The issued access token introspects back to the same subject.
    let response = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = response.body.get("data").unwrap();
    assert_eq!(data.get("id").unwrap().as_str().unwrap(), id.to_string());
    assert_eq!(data.get("email").unwrap().as_str().unwrap(), "admin@x.com");
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new();
    app.create_subject("user@x.com", "P@ss1", vec![RoleName::Viewer], None);

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "user@x.com", "password": "nope" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "ghost@x.com", "password": "P@ss1" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), "InvalidCredentials");
    assert_eq!(unknown_email.error_code(), "InvalidCredentials");
    // Identical envelopes: wrong password and unknown email cannot be told
    // apart by the caller.
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_login_validation_error() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "not-an-email", "password": "x" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_rotation_and_replay() {
    let app = TestApp::new();
    app.create_subject("user@x.com", "pw", vec![RoleName::Dispatcher], None);
    let (_, refresh) = app.login("user@x.com", "pw").await;

    let rotated = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let new_refresh = rotated
        .body
        .pointer("/data/refresh_token")
        .and_then(|v| v.as_str())
        .unwrap()
        .to_string();
    assert_ne!(new_refresh, refresh);

    // Replaying the consumed token fails and revokes everything.
    let replayed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(replayed.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replayed.error_code(), "ReplayDetected");

    // The cascade reached the rotation successor as well.
    let after_cascade = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": new_refresh })),
            None,
        )
        .await;
    assert_eq!(after_cascade.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after_cascade.error_code(), "ReplayDetected");
}

#[tokio::test]
async fn test_refresh_with_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": "never-issued" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "InvalidToken");
}

#[tokio::test]
async fn test_logout_all_revokes_every_session() {
    let app = TestApp::new();
    app.create_subject("user@x.com", "pw", vec![RoleName::Viewer], None);

    let (_, first_refresh) = app.login("user@x.com", "pw").await;
    let (access, _) = app.login("user@x.com", "pw").await;

    let response = app
        .request("POST", "/api/auth/logout-all", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.pointer("/data/revoked").unwrap().as_u64(),
        Some(2)
    );

    // Revoked sessions cannot rotate.
    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": first_refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // The access token stays valid until its own expiry (stateless verify).
    let response = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "InvalidToken");
}

#[tokio::test]
async fn test_logout_single_session() {
    let app = TestApp::new();
    app.create_subject("user@x.com", "pw", vec![RoleName::Viewer], None);
    let (_, refresh) = app.login("user@x.com", "pw").await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
