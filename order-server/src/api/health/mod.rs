//! Health check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    environment: String,
    /// false when the document cannot be read
    store: bool,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let store = match state.store.load().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Health check: store unreadable: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if store { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        store,
    })
}
