use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::notify::NotificationSnapshot;
use crate::utils::{ApiResponse, ApiResult, AppError, ok};

/// GET /api/admin/notifications
pub async fn snapshot(State(state): State<ServerState>) -> ApiResult<NotificationSnapshot> {
    Ok(ok(state.notifications.snapshot()))
}

/// DELETE /api/admin/notifications/staff-calls/{id}
pub async fn clear_staff_call(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    if !state.notifications.clear_staff_call(&id) {
        return Err(AppError::not_found(format!("Notification {id}")));
    }
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /api/admin/notifications/orders/{id}
pub async fn clear_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    if !state.notifications.clear_order(&id) {
        return Err(AppError::not_found(format!("Notification {id}")));
    }
    Ok(Json(ApiResponse::ok()))
}
