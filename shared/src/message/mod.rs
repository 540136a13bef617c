//! 实时同步消息类型定义
//!
//! These types travel over the WebSocket sync feed between pos-server
//! and its browser clients (admin dashboard, customer ordering page).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 同步信号载荷 (服务端 -> 所有订阅客户端)
///
/// 当某个资源发生变更时（由某个客户端请求触发），服务端广播此信号，
/// 通知所有感兴趣的客户端刷新数据。
///
/// Delivery is at-least-once: clients must merge by `id` and tolerate
/// duplicates. `version` increments per resource, letting a client
/// detect a gap and fall back to a full refetch.
///
/// # 示例
/// - `resource`: "order"
/// - `version`: 42
/// - `action`: "created"
/// - `id`: "128064523987"
/// - `table_id`: Some(7)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// 资源类型 (例如: "order", "order_item", "staff_call", "product")
    pub resource: String,
    /// 版本号 (per-resource, monotonically increasing)
    pub version: u64,
    /// 变更类型 ("created", "updated", "deleted")
    pub action: String,
    /// 资源 ID
    pub id: String,
    /// 关联桌台 (orders / order items / staff calls; None for catalog)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    /// 资源数据 (可选，deleted 时为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// WebSocket envelope (服务端 -> 客户端)
///
/// `hello` is sent once on connect and again after the subscriber lags
/// behind the broadcast channel, so the client knows to refetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEnvelope {
    /// Connection (re)established; carries current per-resource versions
    Hello { versions: HashMap<String, u64> },
    /// A single change notification
    Sync(SyncPayload),
}

impl SyncEnvelope {
    /// 序列化为 JSON 文本 (WS text frame)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
