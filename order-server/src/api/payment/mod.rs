//! POS payment API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/payment?barcode= | GET | none (POS lookup) |
//! | /api/payment | POST `{orderId}` | none (issue barcode) |
//! | /api/payment | PATCH `{barcode, paymentStatus, ...}` | none (POS callback) |
//!
//! Barcodes have the form `ORDER_<orderId>_<epoch millis>`.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/payment",
        get(handler::lookup)
            .post(handler::generate_barcode)
            .patch(handler::payment_callback),
    )
}
