//! Food bag handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use foodbag_core::error::AppError;
use foodbag_service::FoodBagQuery;
use foodbag_service::food_bag::NOT_FOUND_OR_DENIED;

use crate::dto::request::{FoodBagListQuery, FoodBagRequest};
use crate::dto::response::{FoodBagResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// POST /food-bags (establishment or admin)
pub async fn create_food_bag(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FoodBagRequest>,
) -> Result<(StatusCode, Json<FoodBagResponse>), ApiError> {
    let bag = state.ledger.create(auth.context(), req.into()).await?;
    Ok((StatusCode::CREATED, Json(bag.into())))
}

/// GET /food-bags
///
/// Only bags whose pickup time is still ahead. Establishments see their own.
pub async fn list_food_bags(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<FoodBagListQuery>,
) -> Result<Json<Vec<FoodBagResponse>>, ApiError> {
    let query = FoodBagQuery {
        only_not_expired: true,
        owner_id: None,
        address: params.address.filter(|a| !a.trim().is_empty()),
    };
    let bags = state.ledger.list(auth.context(), query).await?;
    Ok(Json(bags.into_iter().map(FoodBagResponse::from).collect()))
}

/// GET /food-bags/{id}
pub async fn get_food_bag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FoodBagResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let bag = state
        .ledger
        .get_visible(auth.context(), id)
        .await?
        .ok_or_else(|| AppError::not_found("Food bag not found"))?;
    Ok(Json(bag.into()))
}

/// PUT /food-bags/{id} (owner or admin)
pub async fn update_food_bag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<FoodBagRequest>,
) -> Result<Json<FoodBagResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let bag = state
        .ledger
        .update(auth.context(), id, req.into())
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_OR_DENIED))?;
    Ok(Json(bag.into()))
}

/// DELETE /food-bags/{id} (establishment owner or admin)
pub async fn delete_food_bag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    if !state.ledger.delete(auth.context(), id).await? {
        return Err(AppError::not_found(NOT_FOUND_OR_DENIED).into());
    }
    Ok(Json(MessageResponse::new("Food bag deleted successfully")))
}
