//! Ordering sessions
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/sessions | POST `{tableId}` | none |
//! | /api/sessions?sessionId= | GET | none |
//!
//! Sessions are not stored: the signed token carries its creation time.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sessions", get(handler::validate).post(handler::create))
}
