//! Integration tests for registration and admin user management.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, food_bag_body, id_of, tomorrow};

#[tokio::test]
async fn test_register_defaults_to_client() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/users/register",
            Some(json!({
                "email": "Grace@Example.com",
                "password": "secret-pass",
                "full_name": "Grace Hopper",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "Grace@Example.com");
    assert_eq!(response.body["role"], "client");
    assert_eq!(response.body["full_name"], "Grace Hopper");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_is_case_insensitive() {
    let app = TestApp::new().await;
    app.register("heidi@example.com", "client").await;

    let response = app
        .request(
            "POST",
            "/users/register",
            Some(json!({ "email": "HEIDI@example.com", "password": "other-pass" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_admin_role() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/users/register",
            Some(json!({ "email": "ivan@example.com", "password": "secret", "role": "admin" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_rejects_short_password_and_bad_email() {
    let app = TestApp::new().await;

    let short = app
        .request(
            "POST",
            "/users/register",
            Some(json!({ "email": "judy@example.com", "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .request(
            "POST",
            "/users/register",
            Some(json!({ "email": "not-an-email", "password": "secret-pass" })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let app = TestApp::new().await;
    let client = app.register_and_login("mallory@example.com", "client").await;
    let admin = app.admin_token().await;

    let denied = app.request("GET", "/users/", None, Some(&client)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["message"], "Not enough permissions");

    let anonymous = app.request("GET", "/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let listed = app.request("GET", "/users", None, Some(&admin)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let emails: Vec<&str> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|u| u["email"].as_str())
        .collect();
    assert!(emails.contains(&"mallory@example.com"));
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let shop = app.register("shop@example.com", "establishment").await;
    let shop_token = app.login("shop@example.com", crate::helpers::PASSWORD).await;
    let client = app.register_and_login("niaj@example.com", "client").await;

    let bag = app
        .create_food_bag(&shop_token, food_bag_body("Bagels", 3, tomorrow()))
        .await;
    let bag_id = id_of(&bag);
    let booked = app
        .request(
            "POST",
            "/bookings/",
            Some(json!({ "food_bag_id": bag_id, "quantity": 1 })),
            Some(&client),
        )
        .await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let response = app
        .request("DELETE", &format!("/users/{}", id_of(&shop)), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let bag = app
        .request("GET", &format!("/food-bags/{bag_id}"), None, Some(&admin))
        .await;
    assert_eq!(bag.status, StatusCode::NOT_FOUND);

    let bookings = app.request("GET", "/bookings", None, Some(&client)).await;
    assert_eq!(bookings.status, StatusCode::OK);
    assert_eq!(bookings.body, json!([]));
}

#[tokio::test]
async fn test_delete_user_errors() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let missing = app
        .request(
            "DELETE",
            &format!("/users/{}", Uuid::now_v7()),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let me = app.request("GET", "/auth/me", None, Some(&admin)).await;
    let own = app
        .request("DELETE", &format!("/users/{}", id_of(&me.body)), None, Some(&admin))
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .request("DELETE", "/users/42", None, Some(&admin))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}
