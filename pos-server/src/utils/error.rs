//! Unified error handling
//!
//! Re-exports the shared error system so application code has one
//! import path for [`AppError`] / [`AppResult`] / [`ApiResponse`].

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
