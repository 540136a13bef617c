//! Shared types for the café POS
//!
//! Common types used by the server and its clients: domain models,
//! error types, realtime sync payloads, and the customer-side cart /
//! order-feed state.

pub mod cart;
pub mod error;
pub mod message;
pub mod models;
pub mod order_feed;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Sync feed re-exports (for convenient access)
pub use message::{SyncEnvelope, SyncPayload};
