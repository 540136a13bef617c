//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Amounts are integer minor units. `base_cost` is the purchase cost
/// used for margin reports, never shown to customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub base_cost: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Product joined with its category name (admin menu list)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductWithCategory {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub name: String,
    pub price: i64,
    pub base_cost: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub base_cost: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub base_cost: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
