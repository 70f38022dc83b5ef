//! Integration tests for food bag publishing, listing and ownership.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, food_bag_body, id_of, tomorrow, yesterday};

#[tokio::test]
async fn test_establishment_creates_food_bag() {
    let app = TestApp::new().await;
    let token = app
        .register_and_login("bakery@example.com", "establishment")
        .await;

    let response = app
        .request(
            "POST",
            "/food-bags",
            Some(food_bag_body("Croissants", 5, tomorrow())),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Croissants");
    assert_eq!(response.body["quantity"], 5);
    assert_eq!(response.body["photo_url"], "/placeholder.jpg");
    assert_eq!(response.body["owner"]["email"], "bakery@example.com");
    assert!(response.body["owner"]["id"].is_string());
}

#[tokio::test]
async fn test_client_cannot_create_food_bag() {
    let app = TestApp::new().await;
    let token = app.register_and_login("client@example.com", "client").await;

    let response = app
        .request(
            "POST",
            "/food-bags/",
            Some(food_bag_body("Soup", 1, tomorrow())),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Not enough permissions");
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = TestApp::new().await;
    let token = app
        .register_and_login("deli@example.com", "establishment")
        .await;

    let mut negative_price = food_bag_body("Salad", 1, tomorrow());
    negative_price["price"] = json!(-1.0);
    let response = app
        .request("POST", "/food-bags/", Some(negative_price), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/food-bags/",
            Some(food_bag_body("", 1, tomorrow())),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/food-bags/",
            Some(food_bag_body("Salad", -3, tomorrow())),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_hides_expired_and_filters_address() {
    let app = TestApp::new().await;
    let shop = app
        .register_and_login("market@example.com", "establishment")
        .await;
    let client = app.register_and_login("buyer@example.com", "client").await;

    let fresh = app
        .create_food_bag(&shop, food_bag_body("Fresh", 2, tomorrow()))
        .await;
    app.create_food_bag(&shop, food_bag_body("Stale", 2, yesterday()))
        .await;
    let mut elsewhere = food_bag_body("Elsewhere", 2, tomorrow());
    elsewhere["address"] = json!("1 Harbour Road");
    let elsewhere = app.create_food_bag(&shop, elsewhere).await;

    let all = app.request("GET", "/food-bags/", None, Some(&client)).await;
    assert_eq!(all.status, StatusCode::OK);
    let names: Vec<&str> = all
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|b| b["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Fresh", "Elsewhere"]);

    let filtered = app
        .request("GET", "/food-bags?address=HARBOUR", None, Some(&client))
        .await;
    assert_eq!(filtered.status, StatusCode::OK);
    let ids: Vec<String> = filtered
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(id_of)
        .collect();
    assert_eq!(ids, vec![id_of(&elsewhere)]);
    assert_ne!(ids[0], id_of(&fresh));
}

#[tokio::test]
async fn test_list_requires_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/food-bags/", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_establishment_sees_only_own_bags() {
    let app = TestApp::new().await;
    let first = app
        .register_and_login("first@example.com", "establishment")
        .await;
    let second = app
        .register_and_login("second@example.com", "establishment")
        .await;
    let client = app.register_and_login("viewer@example.com", "client").await;

    let own = app
        .create_food_bag(&first, food_bag_body("Mine", 1, tomorrow()))
        .await;
    let foreign = app
        .create_food_bag(&second, food_bag_body("Theirs", 1, tomorrow()))
        .await;

    let listed = app.request("GET", "/food-bags/", None, Some(&first)).await;
    let ids: Vec<String> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(id_of)
        .collect();
    assert_eq!(ids, vec![id_of(&own)]);

    let hidden = app
        .request(
            "GET",
            &format!("/food-bags/{}", id_of(&foreign)),
            None,
            Some(&first),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let visible = app
        .request(
            "GET",
            &format!("/food-bags/{}", id_of(&foreign)),
            None,
            Some(&client),
        )
        .await;
    assert_eq!(visible.status, StatusCode::OK);

    let client_list = app.request("GET", "/food-bags", None, Some(&client)).await;
    assert_eq!(client_list.body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_non_owner_update_looks_like_missing() {
    let app = TestApp::new().await;
    let owner = app
        .register_and_login("owner@example.com", "establishment")
        .await;
    let other = app
        .register_and_login("other@example.com", "establishment")
        .await;
    let bag = app
        .create_food_bag(&owner, food_bag_body("Pies", 4, tomorrow()))
        .await;

    let foreign = app
        .request(
            "PUT",
            &format!("/food-bags/{}", id_of(&bag)),
            Some(food_bag_body("Stolen", 40, tomorrow())),
            Some(&other),
        )
        .await;
    let missing = app
        .request(
            "PUT",
            &format!("/food-bags/{}", Uuid::now_v7()),
            Some(food_bag_body("Stolen", 40, tomorrow())),
            Some(&other),
        )
        .await;

    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.status, missing.status);
    assert_eq!(foreign.body, missing.body);
    assert_eq!(
        foreign.body["message"],
        "Food bag not found or permission denied"
    );

    let unchanged = app
        .request(
            "GET",
            &format!("/food-bags/{}", id_of(&bag)),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(unchanged.body["name"], "Pies");
    assert_eq!(unchanged.body["quantity"], 4);
}

#[tokio::test]
async fn test_owner_and_admin_update() {
    let app = TestApp::new().await;
    let owner = app
        .register_and_login("cafe@example.com", "establishment")
        .await;
    let admin = app.admin_token().await;

    let mut body = food_bag_body("Muffins", 3, tomorrow());
    body["photo_url"] = json!("/img/muffins.jpg");
    let bag = app.create_food_bag(&owner, body).await;
    let path = format!("/food-bags/{}", id_of(&bag));

    let updated = app
        .request(
            "PUT",
            &path,
            Some(food_bag_body("Muffins XL", 6, tomorrow())),
            Some(&owner),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Muffins XL");
    assert_eq!(updated.body["quantity"], 6);
    assert_eq!(updated.body["photo_url"], "/img/muffins.jpg");

    let by_admin = app
        .request(
            "PUT",
            &path,
            Some(food_bag_body("Muffins (admin)", 1, tomorrow())),
            Some(&admin),
        )
        .await;
    assert_eq!(by_admin.status, StatusCode::OK);
    assert_eq!(by_admin.body["name"], "Muffins (admin)");
    assert_eq!(by_admin.body["owner"]["email"], "cafe@example.com");
}

#[tokio::test]
async fn test_delete_rules() {
    let app = TestApp::new().await;
    let owner = app
        .register_and_login("grocer@example.com", "establishment")
        .await;
    let rival = app
        .register_and_login("rival@example.com", "establishment")
        .await;
    let client = app.register_and_login("shopper@example.com", "client").await;
    let bag = app
        .create_food_bag(&owner, food_bag_body("Apples", 2, tomorrow()))
        .await;
    let path = format!("/food-bags/{}", id_of(&bag));

    let by_client = app.request("DELETE", &path, None, Some(&client)).await;
    assert_eq!(by_client.status, StatusCode::FORBIDDEN);

    let by_rival = app.request("DELETE", &path, None, Some(&rival)).await;
    assert_eq!(by_rival.status, StatusCode::NOT_FOUND);

    let by_owner = app.request("DELETE", &path, None, Some(&owner)).await;
    assert_eq!(by_owner.status, StatusCode::OK);
    assert_eq!(by_owner.body["message"], "Food bag deleted successfully");

    let again = app.request("DELETE", &path, None, Some(&owner)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let gone = app.request("GET", &path, None, Some(&client)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
