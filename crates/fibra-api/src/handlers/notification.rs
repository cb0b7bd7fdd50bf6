//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use fibra_core::error::AppError;
use fibra_notify::actions::actions_for;
use fibra_notify::routing::UnreadSummary;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query parameters for the notification list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Maximum rows returned (default 50, capped at 200).
    pub limit: Option<i64>,
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let notifications = state.notification_repo.find_by_user(auth.id, limit).await?;

    let data: Vec<serde_json::Value> = notifications
        .iter()
        .map(|n| {
            serde_json::json!({
                "id": n.id,
                "type": n.kind,
                "message": n.message,
                "read": n.read,
                "created_at": n.created_at,
                "actions": actions_for(&n.kind, &n.message),
            })
        })
        .collect();

    Ok(Json(serde_json::json!({ "success": true, "data": data })))
}

/// GET /api/notifications/summary
pub async fn unread_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UnreadSummary>>, ApiError> {
    let kinds = state.notification_repo.unread_kinds(auth.id).await?;
    Ok(Json(ApiResponse::ok(UnreadSummary::tally(&kinds))))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = state.notification_repo.mark_read(id, auth.id).await?;
    if updated == 0 {
        return Err(AppError::not_found("Notification not found").into());
    }
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Marked as read" } }),
    ))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.notification_repo.mark_all_read(auth.id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "marked": count } }),
    ))
}
