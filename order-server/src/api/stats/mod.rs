//! Dashboard statistics
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/stats | GET | admin |

use axum::{Router, extract::State, routing::get};

use crate::core::ServerState;
use crate::db::repository::{DashboardStats, StatsRepository};
use crate::utils::{ApiResult, ok};

pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/stats", get(summary))
}

async fn summary(State(state): State<ServerState>) -> ApiResult<DashboardStats> {
    let stats = StatsRepository::new(state.store.clone()).summary().await?;
    Ok(ok(stats))
}
