//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders?tableId=&sessionId=&status= | GET | none |
//! | /api/orders | POST | none (session checked when given) |
//! | /api/orders | PATCH `{orderId, status}` | admin |

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", get(handler::list).post(handler::create))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/orders", patch(handler::update_status))
}
