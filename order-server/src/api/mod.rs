//! HTTP API
//!
//! Every resource lives in `api/<resource>/{mod,handler}.rs`. A module's
//! `router()` carries its public routes and `admin_router()` its staff
//! routes; [`build_router`] puts all admin routes behind `require_auth`
//! and `require_admin`.
//!
//! | Module | Public | Admin |
//! |--------|--------|-------|
//! | [`health`] | /health | - |
//! | [`auth`] | POST /api/auth/login | - |
//! | [`menu`] | GET /api/menu | /api/admin/menu |
//! | [`categories`] | - | /api/admin/categories |
//! | [`tables`] | - | /api/admin/tables |
//! | [`sessions`] | GET/POST /api/sessions | - |
//! | [`orders`] | GET/POST /api/orders | PATCH /api/orders |
//! | [`payment`] | GET/POST/PATCH /api/payment | - |
//! | [`staff_calls`] | POST /api/staff-calls | /api/admin/staff-calls |
//! | [`users`] | - | /api/admin/users |
//! | [`upload`] | - | POST/DELETE /api/upload |
//! | [`stats`] | - | /api/admin/stats |
//! | [`notifications`] | - | /api/admin/notifications |

pub mod auth;
pub mod categories;
pub mod health;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod payment;
pub mod sessions;
pub mod staff_calls;
pub mod stats;
pub mod tables;
pub mod upload;
pub mod users;

use axum::{Router, middleware};

use crate::auth::{require_admin, require_auth};
use crate::core::ServerState;

/// All routes, without global middleware or state
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    let admin = Router::new()
        .merge(menu::admin_router())
        .merge(categories::admin_router())
        .merge(tables::admin_router())
        .merge(orders::admin_router())
        .merge(staff_calls::admin_router())
        .merge(users::admin_router())
        .merge(upload::admin_router())
        .merge(stats::admin_router())
        .merge(notifications::admin_router())
        // route_layer: unknown paths stay 404 instead of 401
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(sessions::router())
        .merge(orders::router())
        .merge(payment::router())
        .merge(staff_calls::router())
        .merge(admin)
}
