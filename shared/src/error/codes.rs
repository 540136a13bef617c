//! Unified error codes
//!
//! All error codes used across the server and frontend. Codes are
//! organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Product / menu errors
//! - 7xxx: Table / area / staff-call errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility (Rust, TypeScript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order can no longer be cancelled (only 'pending' orders can)
    OrderNotCancellable = 4002,
    /// Order has no items
    OrderEmpty = 4003,
    /// Order status string is not a valid status
    InvalidOrderStatus = 4004,

    // ==================== 6xxx: Product / Menu ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product exists but is no longer sold
    ProductInactive = 6002,
    /// Product name already taken
    ProductNameExists = 6003,
    /// Category not found
    CategoryNotFound = 6004,
    /// Category name already taken
    CategoryNameExists = 6005,
    /// Category still has products assigned
    CategoryHasProducts = 6006,

    // ==================== 7xxx: Table / Area ====================
    /// Dining table not found
    TableNotFound = 7001,
    /// Table is marked unavailable for ordering
    TableUnavailable = 7002,
    /// Table name already taken within the area
    TableNameExists = 7003,
    /// Area not found
    AreaNotFound = 7004,
    /// Area name already taken
    AreaNameExists = 7005,
    /// Area still has tables assigned
    AreaHasTables = 7006,
    /// Staff call not found
    StaffCallNotFound = 7007,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::OrderNotFound => "Order not found",
            Self::OrderNotCancellable => "Only pending orders can be cancelled",
            Self::OrderEmpty => "Order must contain at least one item",
            Self::InvalidOrderStatus => "Invalid order status",

            Self::ProductNotFound => "Product not found",
            Self::ProductInactive => "Product is no longer available",
            Self::ProductNameExists => "Product name already exists",
            Self::CategoryNotFound => "Category not found",
            Self::CategoryNameExists => "Category name already exists",
            Self::CategoryHasProducts => "Category still has products",

            Self::TableNotFound => "Table not found",
            Self::TableUnavailable => "Table is not available",
            Self::TableNameExists => "Table name already exists in this area",
            Self::AreaNotFound => "Area not found",
            Self::AreaNameExists => "Area name already exists",
            Self::AreaHasTables => "Area still has tables",
            Self::StaffCallNotFound => "Staff call not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
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

/// Error returned when a u16 does not map to a known [`ErrorCode`]
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
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderNotCancellable,
            4003 => Self::OrderEmpty,
            4004 => Self::InvalidOrderStatus,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductInactive,
            6003 => Self::ProductNameExists,
            6004 => Self::CategoryNotFound,
            6005 => Self::CategoryNameExists,
            6006 => Self::CategoryHasProducts,

            7001 => Self::TableNotFound,
            7002 => Self::TableUnavailable,
            7003 => Self::TableNameExists,
            7004 => Self::AreaNotFound,
            7005 => Self::AreaNameExists,
            7006 => Self::AreaHasTables,
            7007 => Self::StaffCallNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
