//! Staff Call Model (呼叫服务员)

use serde::{Deserialize, Serialize};

/// Staff call status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum StaffCallStatus {
    Pending,
    Completed,
}

/// Staff call entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffCall {
    pub id: i64,
    pub table_id: i64,
    pub note: String,
    pub status: StaffCallStatus,
    pub created_at: i64,
}

/// Staff call joined with table/area names (admin list)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffCallWithTable {
    pub id: i64,
    pub table_id: i64,
    pub table_name: String,
    pub area_name: String,
    pub note: String,
    pub status: StaffCallStatus,
    pub created_at: i64,
}

/// Customer staff-call request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCallCreate {
    #[serde(default)]
    pub note: Option<String>,
}
