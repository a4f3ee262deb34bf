//! Dining table handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::DiningTableRepository;
use crate::utils::{ApiResponse, ApiResult, AppError, AppResult, CreatedResult, ErrorCode, created, ok};
use shared::models::{Table, TableCreate, TableQrCode, TableStatus, TableUpdate};

/// `number` / `capacity`: required, 1..=u32::MAX
fn positive_u32(value: Option<i64>, field: &str) -> AppResult<u32> {
    let value = value.ok_or_else(|| AppError::required(field))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ValueOutOfRange, format!("{field} must be at least 1"))
                .with_detail("field", field)
        })
}

/// GET /api/admin/tables - ordered by number
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Table>> {
    let tables = DiningTableRepository::new(state.store.clone()).find_all().await?;
    Ok(ok(tables))
}

/// POST /api/admin/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TableCreate>,
) -> CreatedResult<Table> {
    let number = positive_u32(payload.number, "number")?;
    let capacity = positive_u32(payload.capacity, "capacity")?;

    let table = DiningTableRepository::new(state.store.clone())
        .create(number, capacity)
        .await?;
    tracing::info!(table_id = %table.id, number = table.number, "Table created");
    Ok(created(table))
}

/// PATCH /api/admin/tables
pub async fn update_status(
    State(state): State<ServerState>,
    Json(payload): Json<TableUpdate>,
) -> ApiResult<Table> {
    let table_id = payload
        .table_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::required("tableId"))?;
    let status = payload.status.ok_or_else(|| AppError::required("status"))?;
    let status: TableStatus = status.parse().map_err(|value: String| {
        AppError::new(ErrorCode::TableInvalidStatus).with_detail("status", value)
    })?;

    let table = DiningTableRepository::new(state.store.clone())
        .update_status(&table_id, status)
        .await?;
    Ok(ok(table))
}

/// DELETE /api/admin/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    DiningTableRepository::new(state.store.clone()).delete(&id).await?;
    tracing::info!(table_id = %id, "Table deleted");
    Ok(Json(ApiResponse::ok()))
}

/// GET /api/admin/tables/{id}/qr - URL encoded into the printed QR code
pub async fn qr_code(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<TableQrCode> {
    let table = DiningTableRepository::new(state.store.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("id", id.clone()))?;

    Ok(ok(TableQrCode {
        qr_code_data: Table::qr_code_data(&state.config.public_base_url, &table.id),
        table_id: table.id,
    }))
}
