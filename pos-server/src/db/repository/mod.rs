//! Repository Module
//!
//! CRUD operations as free functions over `&SqlitePool`, one module
//! per table. Domain rules that need a specific error code return
//! [`RepoError::Domain`]; everything else uses the generic variants.

pub mod area;
pub mod category;
pub mod dining_table;
pub mod order;
pub mod product;
pub mod staff_call;
pub mod store_settings;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{}", .0.message())]
    Domain(ErrorCode),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(code) => AppError::new(code),
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_code() {
        let app: AppError = RepoError::Domain(ErrorCode::OrderNotCancellable).into();
        assert_eq!(app.code, ErrorCode::OrderNotCancellable);
        assert_eq!(app.message, "Only pending orders can be cancelled");
    }

    #[test]
    fn generic_errors_map_to_generic_codes() {
        let app: AppError = RepoError::NotFound("Area 9 not found".into()).into();
        assert_eq!(app.code, ErrorCode::NotFound);

        let app: AppError = RepoError::Duplicate("name taken".into()).into();
        assert_eq!(app.code, ErrorCode::AlreadyExists);

        let app: AppError = RepoError::Database("locked".into()).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
    }
}
