//! Area Model

use serde::{Deserialize, Serialize};

/// Area entity (区域：大厅、露台、包厢等)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Area {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Area with its table count (admin area list)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AreaWithCount {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub table_count: i64,
}

/// Create area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
}

/// Update area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaUpdate {
    pub name: Option<String>,
}
