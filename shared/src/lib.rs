//! Shared types for the table ordering server
//!
//! Domain models, the order status machine, payment barcode and session
//! token codecs, and the unified error/response types used by the HTTP layer.

pub mod error;
pub mod models;
pub mod order;
pub mod session;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::{OrderStatus, sort_for_display};
pub use serde::{Deserialize, Serialize};
pub use session::{SessionClaims, SessionError, SessionSigner};
