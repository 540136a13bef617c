//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::TableNotFound
            | Self::AreaNotFound
            | Self::StaffCallNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::ProductNameExists
            | Self::CategoryNameExists
            | Self::CategoryHasProducts
            | Self::TableNameExists
            | Self::AreaNameExists
            | Self::AreaHasTables => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (business rule violations)
            Self::OrderNotCancellable | Self::ProductInactive | Self::TableUnavailable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 400 Bad Request
            Self::Unknown
            | Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::InvalidOrderStatus => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
