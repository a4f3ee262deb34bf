//! Error codes
//!
//! Codes are grouped by range:
//! - 0xxx: General
//! - 1xxx: Auth / ordering session
//! - 2xxx: Permission
//! - 4xxx: Order
//! - 5xxx: Payment
//! - 6xxx: Menu / upload
//! - 7xxx: Table
//! - 8xxx: User / staff call
//! - 9xxx: System

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so clients can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Document changed since it was read
    StoreConflict = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Ordering session has expired
    SessionExpired = 1005,
    /// Ordering session token is malformed
    SessionInvalidFormat = 1008,
    /// Ordering session token failed signature verification
    SessionInvalidSignature = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been paid
    OrderAlreadyPaid = 4002,
    /// Order has already been completed
    OrderAlreadyCompleted = 4003,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4004,
    /// Order is empty
    OrderEmpty = 4007,
    /// Status change not allowed from the current state
    OrderInvalidTransition = 4008,
    /// Order is not ready for payment
    OrderNotReady = 4009,
    /// Unknown order status value
    OrderInvalidStatus = 4010,

    // ==================== 5xxx: Payment ====================
    /// Barcode does not match `ORDER_<id>_`
    BarcodeInvalid = 5006,
    /// Barcode does not belong to the order
    BarcodeMismatch = 5007,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6002,
    /// Category not found
    CategoryNotFound = 6101,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Content is not a decodable image of the declared format
    InvalidImage = 6503,
    /// No file provided in request
    NoFileProvided = 6504,
    /// Empty file provided
    EmptyFile = 6505,
    /// Path outside the upload area
    InvalidFilePath = 6510,
    /// Uploaded file not found
    FileNotFound = 6511,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Unknown table status value
    TableInvalidStatus = 7005,

    // ==================== 8xxx: User / Staff ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    UserEmailExists = 8002,
    /// Unknown user role
    UserInvalidRole = 8003,
    /// Staff call not found
    StaffCallNotFound = 8201,
    /// Staff call status change not allowed
    StaffCallInvalidTransition = 8202,
    /// Staff call already resolved
    StaffCallAlreadyResolved = 8203,
    /// Unknown staff call type or status
    StaffCallInvalidValue = 8204,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage read/write error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Data file damaged
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Developer-facing English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::StoreConflict => "Data was modified concurrently, please retry",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session expired",
            ErrorCode::SessionInvalidFormat => "Invalid session format",
            ErrorCode::SessionInvalidSignature => "Invalid session token",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",
            ErrorCode::OrderAlreadyCompleted => "Order has already been completed",
            ErrorCode::OrderAlreadyCancelled => "Order has already been cancelled",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderInvalidTransition => "Order status change is not allowed",
            ErrorCode::OrderNotReady => "Order is not ready for payment",
            ErrorCode::OrderInvalidStatus => "Invalid status",

            // Payment
            ErrorCode::BarcodeInvalid => "Invalid barcode",
            ErrorCode::BarcodeMismatch => "Barcode does not match the order",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Invalid price value",
            ErrorCode::CategoryNotFound => "Category not found",

            // Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImage => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::InvalidFilePath => "Invalid file path",
            ErrorCode::FileNotFound => "File not found",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableInvalidStatus => "Invalid table status",

            // User / Staff
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserEmailExists => "Email already registered",
            ErrorCode::UserInvalidRole => "Invalid user role",
            ErrorCode::StaffCallNotFound => "Staff call not found",
            ErrorCode::StaffCallInvalidTransition => "Staff call status change is not allowed",
            ErrorCode::StaffCallAlreadyResolved => "Staff call has already been resolved",
            ErrorCode::StaffCallInvalidValue => "Invalid staff call type or status",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Storage data is corrupted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::StoreConflict),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),
            1008 => Ok(ErrorCode::SessionInvalidFormat),
            1009 => Ok(ErrorCode::SessionInvalidSignature),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyPaid),
            4003 => Ok(ErrorCode::OrderAlreadyCompleted),
            4004 => Ok(ErrorCode::OrderAlreadyCancelled),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderInvalidTransition),
            4009 => Ok(ErrorCode::OrderNotReady),
            4010 => Ok(ErrorCode::OrderInvalidStatus),

            // Payment
            5006 => Ok(ErrorCode::BarcodeInvalid),
            5007 => Ok(ErrorCode::BarcodeMismatch),

            // Menu / upload
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImage),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6510 => Ok(ErrorCode::InvalidFilePath),
            6511 => Ok(ErrorCode::FileNotFound),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7005 => Ok(ErrorCode::TableInvalidStatus),

            // User / Staff
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserEmailExists),
            8003 => Ok(ErrorCode::UserInvalidRole),
            8201 => Ok(ErrorCode::StaffCallNotFound),
            8202 => Ok(ErrorCode::StaffCallInvalidTransition),
            8203 => Ok(ErrorCode::StaffCallAlreadyResolved),
            8204 => Ok(ErrorCode::StaffCallInvalidValue),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::StoreConflict.code(), 9);
        assert_eq!(ErrorCode::SessionExpired.code(), 1005);
        assert_eq!(ErrorCode::OrderInvalidTransition.code(), 4008);
        assert_eq!(ErrorCode::BarcodeInvalid.code(), 5006);
        assert_eq!(ErrorCode::TableNotFound.code(), 7001);
        assert_eq!(ErrorCode::StaffCallNotFound.code(), 8201);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let codes = [
            ErrorCode::ValidationFailed,
            ErrorCode::StoreConflict,
            ErrorCode::SessionInvalidSignature,
            ErrorCode::AdminRequired,
            ErrorCode::OrderNotReady,
            ErrorCode::BarcodeMismatch,
            ErrorCode::InvalidImage,
            ErrorCode::FileNotFound,
            ErrorCode::TableInvalidStatus,
            ErrorCode::StaffCallInvalidValue,
            ErrorCode::StorageCorrupted,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "4001");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::SessionExpired.message(), "Session expired");
        assert_eq!(ErrorCode::OrderInvalidStatus.message(), "Invalid status");
    }
}
