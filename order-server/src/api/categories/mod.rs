//! Category API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/categories | GET, POST, PATCH, DELETE `?id=` | admin |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/categories",
        get(handler::list)
            .post(handler::create)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
