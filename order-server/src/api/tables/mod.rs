//! Dining table API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/tables | GET, POST, PATCH `{tableId, status}` | admin |
//! | /api/admin/tables/{id} | DELETE | admin |
//! | /api/admin/tables/{id}/qr | GET | admin |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/tables",
            get(handler::list).post(handler::create).patch(handler::update_status),
        )
        .route("/api/admin/tables/{id}", delete(handler::delete))
        .route("/api/admin/tables/{id}/qr", get(handler::qr_code))
}
