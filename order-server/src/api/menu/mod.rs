//! Menu API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu | GET | none (available items only) |
//! | /api/admin/menu | GET, POST, PATCH, DELETE `?id=` | admin |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::list_available))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/menu",
        get(handler::list)
            .post(handler::create)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
