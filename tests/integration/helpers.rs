//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Duration, Utc};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use foodbag_api::{AppState, build_router};
use foodbag_core::config::AppConfig;
use foodbag_database::Stores;

pub const ADMIN_EMAIL: &str = "root@foodbag.test";
pub const ADMIN_PASSWORD: &str = "root-password";
pub const PASSWORD: &str = "secret-pass";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
}

/// A decoded response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Create a new test application over the memory store with a seeded admin.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::for_tests()).await
    }

    /// Create a test application with a custom configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        let state = AppState::build(config, Stores::memory()).expect("Failed to build state");
        state
            .user_service
            .seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("Failed to seed admin");

        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// POST the login form
    pub async fn login_response(&self, email: &str, password: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("email={email}&password={password}")))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Login and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self.login_response(email, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Register a user with the given role and return the response body
    pub async fn register(&self, email: &str, role: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/users/register",
                Some(json!({ "email": email, "password": PASSWORD, "role": role })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.body
    }

    /// Register, login and return the token
    pub async fn register_and_login(&self, email: &str, role: &str) -> String {
        self.register(email, role).await;
        self.login(email, PASSWORD).await
    }

    /// Token for the seeded administrator
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Create a food bag and return the response body
    pub async fn create_food_bag(&self, token: &str, body: Value) -> Value {
        let response = self.request("POST", "/food-bags/", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body
    }
}

/// A valid food bag body
pub fn food_bag_body(name: &str, quantity: i32, pickup_time: DateTime<Utc>) -> Value {
    json!({
        "name": name,
        "description": "Bread and pastries",
        "price": 12.0,
        "discounted_price": 4.5,
        "quantity": quantity,
        "address": "12 Baker Street",
        "pickup_time": pickup_time,
    })
}

/// A pickup time comfortably in the future
pub fn tomorrow() -> DateTime<Utc> {
    Utc::now() + Duration::days(1)
}

/// A pickup time in the past
pub fn yesterday() -> DateTime<Utc> {
    Utc::now() - Duration::days(1)
}

/// The `id` field of a response body
pub fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("No id in body").to_string()
}
