use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Local, Utc};

use crate::core::ServerState;
use crate::utils::validation::{MAX_ID_LEN, require_text};
use crate::utils::{ApiResult, AppError, AppResult, ok};
use shared::models::{SessionCreate, SessionInfo, SessionQuery, SessionValidation};
use shared::session::{SessionClaims, session_name};

fn to_datetime(millis: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::invalid_request(format!("Timestamp out of range: {millis}")))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SessionCreate>,
) -> ApiResult<SessionInfo> {
    let table_id = require_text(payload.table_id, "tableId", MAX_ID_LEN)?;

    let now_ms = Utc::now().timestamp_millis();
    let session_id = state.sessions.issue(now_ms);
    let claims = SessionClaims { created_at_ms: now_ms };
    let created_at = to_datetime(now_ms)?;

    tracing::debug!(table_id = %table_id, "Session created");

    Ok(ok(SessionInfo {
        session_id,
        session_name: session_name(&created_at.with_timezone(&Local)),
        table_id,
        created_at,
        expires_at: to_datetime(claims.expires_at_ms())?,
    }))
}

/// GET /api/sessions?sessionId=
///
/// Malformed or forged tokens are rejected with 400. A genuine but expired
/// token is answered normally with `valid: false`.
pub async fn validate(
    State(state): State<ServerState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<SessionValidation> {
    let session_id = require_text(query.session_id, "sessionId", MAX_ID_LEN)?;
    let claims = state.sessions.decode(&session_id)?;
    let now_ms = Utc::now().timestamp_millis();

    Ok(ok(SessionValidation {
        valid: !claims.is_expired(now_ms),
        created_at: to_datetime(claims.created_at_ms)?,
        expires_at: to_datetime(claims.expires_at_ms())?,
        session_id,
    }))
}
