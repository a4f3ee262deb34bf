//! Core: configuration, shared state and the HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{AdminBootstrap, Config};
pub use server::{Server, build_app};
pub use state::ServerState;
