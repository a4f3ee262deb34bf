//! User administration
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/users | GET, POST, PATCH `{id, ...}`, DELETE `?id=` | admin |
//!
//! Password hashes never leave the server.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/users",
        get(handler::list)
            .post(handler::create)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
