//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// `is_available` gates customer ordering only; the table keeps showing
/// on the admin map either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub area_id: i64,
    pub is_available: bool,
    pub created_at: i64,
}

/// Dining table joined with its area name (customer menu, staff calls)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableWithArea {
    pub id: i64,
    pub name: String,
    pub area_id: i64,
    pub area_name: String,
    pub is_available: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub area_id: i64,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub area_id: Option<i64>,
    pub is_available: Option<bool>,
}
