//! 同步广播 hub
//!
//! # 架构
//!
//! ```text
//! API handler ──▶ broadcast_sync() ──▶ SyncHub (broadcast channel)
//!                                          │
//!                            ┌─────────────┼─────────────┐
//!                            ▼             ▼             ▼
//!                        admin WS      customer WS   customer WS
//!                        (全量订阅)    (table 7)     (table 12)
//! ```
//!
//! 每个 WebSocket 连接持有一个 receiver，按 table/resource 自行过滤。
//! 无订阅者时 send 返回 Err，安全忽略：变更本身已落库，客户端
//! 下次连接时通过版本号发现落后并全量刷新。

use shared::message::SyncPayload;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// 同步广播 hub - 负责变更通知的进程内分发
#[derive(Debug, Clone)]
pub struct SyncHub {
    /// 服务器到客户端的广播通道
    tx: broadcast::Sender<SyncPayload>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl SyncHub {
    /// 创建指定容量的 hub
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 发布变更通知 (服务器 -> 所有订阅者)
    ///
    /// 无订阅者属于正常情况，返回值被忽略。
    pub fn publish(&self, payload: SyncPayload) {
        let _ = self.tx.send(payload);
    }

    /// 订阅变更通知 (每个 WS 连接一个 receiver)
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// 获取关闭令牌 (WS 连接监听此令牌退出)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 优雅关闭：通知所有 WS 连接退出
    pub fn shutdown(&self) {
        tracing::info!("Shutting down sync hub");
        self.shutdown_token.cancel();
    }
}

impl Default for SyncHub {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}
