//! Staff notifications
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/notifications | GET | admin |
//! | /api/admin/notifications/staff-calls/{id} | DELETE | admin |
//! | /api/admin/notifications/orders/{id} | DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/notifications", get(handler::snapshot))
        .route(
            "/api/admin/notifications/staff-calls/{id}",
            delete(handler::clear_staff_call),
        )
        .route(
            "/api/admin/notifications/orders/{id}",
            delete(handler::clear_order),
        )
}
