//! Store Settings Model (singleton row)

use serde::{Deserialize, Serialize};

/// Store settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StoreSettings {
    pub id: i64,
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub wifi_pass: String,
    pub updated_at: i64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            id: 1,
            store_name: "Local Cafe".to_string(),
            address: String::new(),
            phone: String::new(),
            wifi_pass: String::new(),
            updated_at: 0,
        }
    }
}

/// Update store settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettingsUpdate {
    pub store_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub wifi_pass: Option<String>,
}
