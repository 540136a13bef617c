//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied here before anything reaches a repository.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: area, table, category, product
pub const MAX_NAME_LEN: usize = 200;

/// Notes (order item note, staff call note)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, wifi password
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
