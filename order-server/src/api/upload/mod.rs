//! Menu image upload
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/upload | POST multipart `file` | admin |
//! | /api/upload?path=/uploads/menu/<file> | DELETE | admin |
//!
//! Files land in `<UPLOAD_DIR>/menu/` and are served under `/uploads`.

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

/// Multipart framing on top of the file itself
const BODY_LIMIT: usize = handler::MAX_FILE_SIZE + 64 * 1024;

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload", post(handler::upload).delete(handler::delete))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}
