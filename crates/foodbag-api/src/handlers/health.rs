//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Reports `degraded` with 503 when the database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = match state.stores.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Storage health check failed");
            false
        }
    };

    let (status, label) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
