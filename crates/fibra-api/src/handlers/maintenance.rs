//! Maintenance kickoff handler.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/maintenance/kickoff
///
/// Runs the maintenance tasks selected by the caller's role. Always
/// returns a success-shaped payload for an authenticated caller; per-task
/// failures are reported inside the result list, never as a top-level
/// error.
pub async fn kickoff(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let results = state.coordinator.run(auth.id, auth.role).await;
    Ok(Json(
        serde_json::json!({ "success": true, "results": results }),
    ))
}
