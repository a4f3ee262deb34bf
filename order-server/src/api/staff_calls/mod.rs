//! Staff call API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/staff-calls | POST `{tableId, type, message?}` | none |
//! | /api/admin/staff-calls | GET, PATCH `{id, status}`, DELETE `?id=` | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/staff-calls", post(handler::create))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/staff-calls",
        get(handler::list)
            .patch(handler::update_status)
            .delete(handler::delete),
    )
}
