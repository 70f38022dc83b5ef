//! Booking handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::dto::request::BookingRequest;
use crate::dto::response::{BookingResponse, PingResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /bookings (clients only)
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    info!(
        user_id = %auth.user_id,
        role = %auth.role,
        food_bag_id = %req.food_bag_id,
        quantity = req.quantity,
        "Booking attempt"
    );

    let booking = state
        .booking_engine
        .book(auth.context(), req.food_bag_id, req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// GET /bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = state.booking_engine.list_for_user(auth.context()).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ping: "pong".to_string(),
    })
}
