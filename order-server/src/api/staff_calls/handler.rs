use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::core::ServerState;
use crate::db::repository::StaffCallRepository;
use crate::utils::validation::{MAX_ID_LEN, MAX_NOTE_LEN, require_text, validate_optional_text};
use crate::utils::{ApiResponse, ApiResult, CreatedResult, IdQuery, created, ok};
use shared::models::{StaffCall, StaffCallCreate, StaffCallStatus, StaffCallType, StaffCallUpdate};
use shared::util::prefixed_id;

/// POST /api/staff-calls
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCallCreate>,
) -> CreatedResult<StaffCall> {
    let table_id = require_text(payload.table_id, "tableId", MAX_ID_LEN)?;
    let call_type: StaffCallType = require_text(payload.call_type, "type", MAX_ID_LEN)?.parse()?;
    validate_optional_text(&payload.message, "message", MAX_NOTE_LEN)?;

    let call = StaffCall {
        id: prefixed_id("call"),
        table_id,
        call_type,
        message: payload.message.unwrap_or_default(),
        status: StaffCallStatus::Pending,
        created_at: Utc::now(),
        resolved_at: None,
    };

    let call = StaffCallRepository::new(state.store.clone()).create(call).await?;
    tracing::info!(call_id = %call.id, table_id = %call.table_id, "Staff call created");
    Ok(created(call))
}

/// GET /api/admin/staff-calls - newest first
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<StaffCall>> {
    let calls = StaffCallRepository::new(state.store.clone()).find_all().await?;
    Ok(ok(calls))
}

/// PATCH /api/admin/staff-calls
pub async fn update_status(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCallUpdate>,
) -> ApiResult<StaffCall> {
    let id = require_text(payload.id, "id", MAX_ID_LEN)?;
    let status: StaffCallStatus = require_text(payload.status, "status", MAX_ID_LEN)?.parse()?;

    let call = StaffCallRepository::new(state.store.clone())
        .update_status(&id, status)
        .await?;
    tracing::info!(call_id = %call.id, status = call.status.as_str(), "Staff call updated");
    Ok(ok(call))
}

/// DELETE /api/admin/staff-calls?id=
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    let id = query.require()?;
    StaffCallRepository::new(state.store.clone()).delete(&id).await?;
    state.notifications.clear_staff_call(&id);
    Ok(Json(ApiResponse::ok()))
}
