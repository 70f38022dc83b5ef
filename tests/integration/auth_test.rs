//! Integration tests for the login, logout and session token flow.

use axum::body::Body;
use http::{Request, StatusCode, header};

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let app = TestApp::new().await;
    app.register("alice@example.com", "client").await;

    let response = app.login_response("alice@example.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].is_string());
    assert_eq!(response.body["token_type"], "bearer");

    let cookie = response.set_cookie().expect("login must set the session cookie");
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("Bearer"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=1800"));
    // Test config runs in debug mode, so the cookie works over plain HTTP.
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;
    app.register("bob@example.com", "client").await;

    let response = app.login_response("bob@example.com", "wrong-password").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Incorrect email or password");
    assert_eq!(response.headers[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app.login_response("nobody@example.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Incorrect email or password");
}

#[tokio::test]
async fn test_me_with_bearer_header() {
    let app = TestApp::new().await;
    let token = app
        .register_and_login("carol@example.com", "establishment")
        .await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "carol@example.com");
    assert_eq!(response.body["role"], "establishment");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let app = TestApp::new().await;
    app.register("dave@example.com", "client").await;
    let login = app.login_response("dave@example.com", PASSWORD).await;
    let set_cookie = login.set_cookie().expect("missing cookie").to_string();
    let pair = set_cookie.split(';').next().expect("empty cookie");

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "dave@example.com");
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Not authenticated");
    assert_eq!(response.headers[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_me_with_tampered_token() {
    let app = TestApp::new().await;
    let token = app.register_and_login("erin@example.com", "client").await;

    let (head, signature) = token.rsplit_once('.').expect("token has three parts");
    let first = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{head}.{first}{}", &signature[1..]);

    let response = app
        .request("GET", "/auth/me", None, Some(&tampered))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::new().await;
    let user = app.register("frank@example.com", "client").await;
    let token = app.login("frank@example.com", PASSWORD).await;
    let admin = app.admin_token().await;

    let id = user["id"].as_str().expect("no id");
    let deleted = app
        .request("DELETE", &format!("/users/{id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Successfully logged out");
    let cookie = response.set_cookie().expect("logout must expire the cookie");
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_with_session_cookie_expires_it() {
    let app = TestApp::new().await;
    app.register("frank@example.com", "client").await;
    let login = app.login_response("frank@example.com", PASSWORD).await;
    let set_cookie = login.set_cookie().expect("missing cookie").to_string();
    let pair = set_cookie.split(';').next().expect("empty cookie");

    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie().expect("logout must expire the cookie");
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));
}
