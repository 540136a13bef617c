//! Customer order history reconciliation
//!
//! Keeps the "my orders" view current against the at-least-once sync
//! feed. On an order notification the client refetches the full joined
//! record and merges it here by id: update in place when present,
//! otherwise prepend. Duplicate notifications therefore collapse into
//! the same entry, and aggregates are always recomputed from the merged
//! records instead of being accumulated incrementally.

use serde::{Deserialize, Serialize};

use crate::models::{OrderDetail, OrderStatus};

/// Local order history, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFeed {
    orders: Vec<OrderDetail>,
}

impl OrderFeed {
    pub fn new(initial: Vec<OrderDetail>) -> Self {
        Self { orders: initial }
    }

    pub fn orders(&self) -> &[OrderDetail] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Merge a freshly fetched record: replace the entry with the same
    /// id, or prepend when unseen. Idempotent under duplicates.
    pub fn merge(&mut self, detail: OrderDetail) {
        if let Some(existing) = self.orders.iter_mut().find(|o| o.id == detail.id) {
            *existing = detail;
        } else {
            self.orders.insert(0, detail);
        }
    }

    /// Patch just the status of a known order (UPDATE notifications
    /// carry the new status without the joined items). Returns false
    /// when the order is unknown and a full refetch is needed.
    pub fn apply_status(&mut self, order_id: i64, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    /// Drop orders that reached a terminal state (paid / cancelled)
    pub fn prune_terminal(&mut self) {
        self.orders.retain(|o| !o.status.is_terminal());
    }

    /// Total across non-terminal orders, recomputed on every call
    pub fn open_amount(&self) -> i64 {
        self.orders
            .iter()
            .filter(|o| !o.status.is_terminal())
            .map(|o| o.total_amount)
            .sum()
    }
}
