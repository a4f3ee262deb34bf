//! HTTP server
//!
//! [`build_app`] wires every route, the static upload directory and the
//! tower-http middleware; [`Server::run`] binds the listener, starts the
//! notification pollers and serves until the shutdown token fires.

use std::net::SocketAddr;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::{Config, ServerState};
use crate::notify::{PollTarget, Poller};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Fully configured application: routes, `/uploads`, middleware and state
pub fn build_app(state: ServerState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);

    api::build_router(&state)
        .nest_service("/uploads", uploads)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown` is cancelled; pollers stop with it
    pub async fn run(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        self.start_background_tasks(&shutdown);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("order-server listening on {}", addr);

        let app = build_app(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await?;

        Ok(())
    }

    fn start_background_tasks(&self, shutdown: &CancellationToken) {
        let pollers = [
            (PollTarget::StaffCalls, self.config.staff_call_poll_interval),
            (PollTarget::Orders, self.config.order_poll_interval),
        ];
        for (target, interval) in pollers {
            let poller = Poller::new(
                self.state.store.clone(),
                self.state.notifications.clone(),
                target,
                interval,
                shutdown.clone(),
            );
            tokio::spawn(poller.run());
        }
    }
}
