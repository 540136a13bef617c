//! Table Map Models (admin floor view)
//!
//! Occupancy is never stored. It is derived at read time from the
//! table's non-terminal orders and recomputed on every request.

use serde::{Deserialize, Serialize};

/// Derived table activity state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableActivity {
    Empty,
    Occupied,
}

/// One table on the floor map with its derived stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOccupancy {
    pub id: i64,
    pub name: String,
    pub is_available: bool,
    pub status: TableActivity,
    /// Minutes since the earliest active order (0 when empty)
    pub duration_minutes: i64,
    /// Sum of total_amount over active orders
    pub total_amount: i64,
    /// Sum of quantities over items of orders still pending/preparing
    pub item_count: i64,
}

/// One area of the floor map with all its tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaMap {
    pub id: i64,
    pub name: String,
    pub tables: Vec<TableOccupancy>,
}
