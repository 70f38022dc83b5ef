//! User handlers: registration and admin user management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_all(auth.context()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// DELETE /users/{id} (admin only)
///
/// Removes the user's bookings, the bags they published and the bookings
/// on those bags.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = parse_uuid(&id)?;
    state
        .user_service
        .delete_user(auth.context(), user_id)
        .await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
