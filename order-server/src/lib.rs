//! Table ordering server
//!
//! Customers scan a table's QR code, open an ordering session, browse the
//! menu, place orders and call staff. Staff manage the menu, tables, orders
//! and users through the admin API and pay orders through a POS barcode.
//!
//! # Module layout
//!
//! ```text
//! order-server/src/
//! ├── core/      # config, state, HTTP server
//! ├── db/        # flat JSON document store + repositories
//! ├── auth/      # JWT, argon2, admin middleware
//! ├── api/       # HTTP routes and handlers
//! ├── notify/    # staff call / new order pollers
//! └── utils/     # logging, validation, response helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - accepts tracing field syntax
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
