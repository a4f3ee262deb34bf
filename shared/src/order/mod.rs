//! Order lifecycle: status machine, display ordering and payment barcodes

pub mod barcode;
mod status;

pub use barcode::BarcodeError;
pub use status::{OrderStatus, ParseStatusError, TransitionError, sort_for_display};
