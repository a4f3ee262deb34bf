//! Payment barcode codec
//!
//! Format: `ORDER_<orderId>_<epoch millis>`. The order id is recovered by
//! finding `ORDER_` followed by a non-empty run of non-underscore characters
//! and another `_`, anywhere in the scanned string.

use crate::error::{AppError, ErrorCode};
use thiserror::Error;

pub const BARCODE_PREFIX: &str = "ORDER_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    #[error("malformed barcode: {0}")]
    Malformed(String),
}

impl From<BarcodeError> for AppError {
    fn from(err: BarcodeError) -> Self {
        match err {
            BarcodeError::Malformed(code) => {
                AppError::new(ErrorCode::BarcodeInvalid).with_detail("barcode", code)
            }
        }
    }
}

pub fn generate(order_id: &str, now_millis: i64) -> String {
    format!("{BARCODE_PREFIX}{order_id}_{now_millis}")
}

/// Extract the order id from a scanned barcode
pub fn parse_order_id(barcode: &str) -> Result<&str, BarcodeError> {
    for (start, _) in barcode.match_indices(BARCODE_PREFIX) {
        let rest = &barcode[start + BARCODE_PREFIX.len()..];
        if let Some(end) = rest.find('_')
            && end > 0
        {
            return Ok(&rest[..end]);
        }
    }
    Err(BarcodeError::Malformed(barcode.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        assert_eq!(generate("abc123", 1700000000000), "ORDER_abc123_1700000000000");
    }

    #[test]
    fn test_parse_generated() {
        let code = generate("f3c1e2d4", 1714560000000);
        assert_eq!(parse_order_id(&code), Ok("f3c1e2d4"));
    }

    #[test]
    fn test_parse_uuid_with_dashes() {
        let code = "ORDER_3b241101-e2bb-4255-8caf-4136c566a962_1714560000000";
        assert_eq!(
            parse_order_id(code),
            Ok("3b241101-e2bb-4255-8caf-4136c566a962")
        );
    }

    #[test]
    fn test_parse_with_scanner_noise() {
        assert_eq!(parse_order_id("]C1ORDER_42_17"), Ok("42"));
    }

    #[test]
    fn test_parse_skips_empty_id_match() {
        assert_eq!(parse_order_id("ORDER__ORDER_7_1"), Ok("7"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "ORDER_", "ORDER_abc", "ORDER__123", "order_abc_1", "TICKET_1_2"] {
            assert!(parse_order_id(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_error_code() {
        let err: AppError = parse_order_id("nope").unwrap_err().into();
        assert_eq!(err.code, ErrorCode::BarcodeInvalid);
    }
}
