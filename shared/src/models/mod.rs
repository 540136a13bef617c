//! Data models
//!
//! Shared between pos-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps epoch milliseconds.

pub mod area;
pub mod category;
pub mod dining_table;
pub mod order;
pub mod product;
pub mod staff_call;
pub mod store_settings;
pub mod table_map;

// Re-exports
pub use area::*;
pub use category::*;
pub use dining_table::*;
pub use order::*;
pub use product::*;
pub use staff_call::*;
pub use store_settings::*;
pub use table_map::*;

use serde::{Deserialize, Serialize};

/// Soft action result (customer cancel, staff-call complete)
///
/// Returned with HTTP 200 either way; `success` carries the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
