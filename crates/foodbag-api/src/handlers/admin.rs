//! Admin-only operational endpoints.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::info;

use foodbag_auth::AuthorizationGuard;
use foodbag_auth::rbac::ADMINISTRATORS;

use crate::dto::response::ReaperRunResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /admin/reaper/run
///
/// Runs one expiry sweep now, outside the schedule.
pub async fn run_reaper(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ReaperRunResponse>, ApiError> {
    AuthorizationGuard::new().require_role(auth.role, ADMINISTRATORS)?;

    let removed = state.reaper.run_once(Utc::now()).await?;
    info!(removed, triggered_by = %auth.user_id, "Manual expiry sweep finished");
    Ok(Json(ReaperRunResponse { removed }))
}
