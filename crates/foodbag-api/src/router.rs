//! Route definitions for the FoodBag HTTP API.
//!
//! Collection routes answer on both the bare and the trailing-slash path.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = request_timeout_layer(state.config.server.request_timeout_seconds);

    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(food_bag_routes())
        .merge(booking_routes())
        .merge(admin_routes())
        .route("/health", get(handlers::health::health))
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Requests still running after `seconds` (at least one) answer 408.
fn request_timeout_layer(seconds: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(seconds.max(1)),
    )
}

/// Auth endpoints: login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// User endpoints: registration and admin management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::user::register))
        .route("/users", get(handlers::user::list_users))
        .route("/users/", get(handlers::user::list_users))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Food bag CRUD
fn food_bag_routes() -> Router<AppState> {
    let collection = || {
        get(handlers::food_bag::list_food_bags).post(handlers::food_bag::create_food_bag)
    };
    Router::new()
        .route("/food-bags", collection())
        .route("/food-bags/", collection())
        .route(
            "/food-bags/{id}",
            get(handlers::food_bag::get_food_bag)
                .put(handlers::food_bag::update_food_bag)
                .delete(handlers::food_bag::delete_food_bag),
        )
}

/// Bookings and the liveness ping
fn booking_routes() -> Router<AppState> {
    let collection =
        || get(handlers::booking::list_bookings).post(handlers::booking::create_booking);
    Router::new()
        .route("/bookings", collection())
        .route("/bookings/", collection())
        .route("/bookings/ping", get(handlers::booking::ping))
}

/// Admin operations
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/reaper/run", post(handlers::admin::run_reaper))
}
