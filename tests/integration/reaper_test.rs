//! Integration tests for expiry sweeping.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, food_bag_body, id_of, tomorrow, yesterday};

#[tokio::test]
async fn test_expired_bag_is_hidden_then_reaped() {
    let app = TestApp::new().await;
    let shop = app
        .register_and_login("late@example.com", "establishment")
        .await;
    let admin = app.admin_token().await;

    let expired = app
        .create_food_bag(&shop, food_bag_body("Yesterday's bread", 3, yesterday()))
        .await;
    let path = format!("/food-bags/{}", id_of(&expired));

    let listed = app.request("GET", "/food-bags/", None, Some(&shop)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));

    let swept = app
        .request("POST", "/admin/reaper/run", None, Some(&admin))
        .await;
    assert_eq!(swept.status, StatusCode::OK);
    assert_eq!(swept.body["removed"], 1);

    let fetched = app.request("GET", &path, None, Some(&shop)).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let again = app
        .request("POST", "/admin/reaper/run", None, Some(&admin))
        .await;
    assert_eq!(again.body["removed"], 0);
}

#[tokio::test]
async fn test_reaper_removes_bookings_and_spares_live_bags() {
    let app = TestApp::new().await;
    let shop = app
        .register_and_login("timer@example.com", "establishment")
        .await;
    let client = app.register_and_login("early@example.com", "client").await;

    let soon = Utc::now() + Duration::seconds(2);
    let expiring = app
        .create_food_bag(&shop, food_bag_body("Expiring", 2, soon))
        .await;
    let live = app
        .create_food_bag(&shop, food_bag_body("Live", 2, tomorrow()))
        .await;

    let booked = app
        .request(
            "POST",
            "/bookings/",
            Some(json!({ "food_bag_id": id_of(&expiring), "quantity": 1 })),
            Some(&client),
        )
        .await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let removed = app
        .state
        .reaper
        .run_once(soon + Duration::seconds(1))
        .await
        .expect("sweep failed");
    assert_eq!(removed, 1);

    let bookings = app.request("GET", "/bookings/", None, Some(&client)).await;
    assert_eq!(bookings.body, json!([]));
    let orphans = app
        .state
        .stores
        .bookings
        .list_by_food_bag(id_of(&expiring).parse().expect("uuid"))
        .await
        .expect("list bookings");
    assert!(orphans.is_empty());

    let still_there = app
        .request(
            "GET",
            &format!("/food-bags/{}", id_of(&live)),
            None,
            Some(&client),
        )
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_manual_sweep_requires_admin() {
    let app = TestApp::new().await;
    let shop = app
        .register_and_login("nosy@example.com", "establishment")
        .await;

    let response = app
        .request("POST", "/admin/reaper/run", None, Some(&shop))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
