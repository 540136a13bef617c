//! Order Model
//!
//! Lifecycle: pending → preparing → served → paid, with cancelled as a
//! second terminal state. Transitions are triggered by admin status
//! buttons; customers may only cancel while the order is still pending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Preparing,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Statuses that keep a table "occupied" on the admin map
    pub const ACTIVE: [OrderStatus; 3] = [Self::Pending, Self::Preparing, Self::Served];

    /// Terminal statuses never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Served => "served",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "served" => Ok(Self::Served),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::with_message(
                ErrorCode::InvalidOrderStatus,
                format!("'{other}' is not a valid order status"),
            )),
        }
    }
}

/// Order entity (row shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order item with its product name joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub note: String,
    /// Unit price frozen at insert time; later menu edits never touch it
    pub price_at_order: i64,
}

/// Order joined with table/area names and its items
///
/// The shape every order read path returns, and the record customers
/// merge into their local history on sync events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub table_id: i64,
    pub table_name: String,
    pub area_name: String,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub items: Vec<OrderItem>,
}

/// One submitted cart line (customer order submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDraft {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Customer order submission payload
///
/// Carries no prices on purpose: the server prices every line from the
/// current menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmit {
    pub items: Vec<OrderItemDraft>,
}

/// Admin status transition payload (raw string, validated server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_roundtrip() {
        for s in ["pending", "preparing", "served", "paid", "cancelled"] {
            let status: OrderStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn invalid_status_is_rejected() {
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Served.is_terminal());
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
    }
}
