//! Sync WebSocket endpoint — 实时变更推送
//!
//! GET /api/sync/ws?table_id=<id>&resources=order,staff_call
//!
//! 协议:
//! - Server → Client: [`SyncEnvelope`] (`hello` 一次，之后 `sync` 流)
//! - Client → Server: 无业务消息（Close/Ping 之外忽略）
//!
//! 顾客页带 `table_id` 只收本桌的订单/呼叫变更（目录变更照常下发），
//! 管理端不带参数收全量。订阅落后 (Lagged) 时重发 `hello`，客户端
//! 据此全量刷新。

use std::collections::HashSet;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::core::ServerState;
use shared::message::{SyncEnvelope, SyncPayload};

/// 心跳间隔
const PING_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    /// 只接收该桌台相关的变更（目录类变更不受影响）
    pub table_id: Option<i64>,
    /// 逗号分隔的资源过滤 (如 "order,order_item,staff_call")
    pub resources: Option<String>,
}

/// 连接级过滤器
#[derive(Debug, Clone)]
struct SyncFilter {
    table_id: Option<i64>,
    resources: Option<HashSet<String>>,
}

impl SyncFilter {
    fn from_query(query: &SyncQuery) -> Self {
        let resources = query.resources.as_ref().map(|raw| {
            raw.split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect::<HashSet<_>>()
        });
        Self {
            table_id: query.table_id,
            resources,
        }
    }

    /// 目录类事件 (table_id = None) 对所有连接可见；
    /// 桌台绑定事件只发给对应桌台（或未过滤的管理端）。
    fn matches(&self, payload: &SyncPayload) -> bool {
        if let Some(set) = &self.resources
            && !set.contains(&payload.resource)
        {
            return false;
        }
        match (self.table_id, payload.table_id) {
            (Some(filter), Some(event_table)) => filter == event_table,
            _ => true,
        }
    }
}

/// GET /api/sync/ws - upgrade to WebSocket
pub async fn handle_sync_ws(
    State(state): State<ServerState>,
    Query(query): Query<SyncQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let filter = SyncFilter::from_query(&query);
    ws.on_upgrade(move |socket| sync_session(socket, state, filter))
}

async fn sync_session(socket: WebSocket, state: ServerState, filter: SyncFilter) {
    let (mut sink, mut stream) = socket.split();

    tracing::info!(
        table_id = ?filter.table_id,
        subscribers = state.sync_hub.subscriber_count() + 1,
        "Sync WS connected"
    );

    let mut rx = state.sync_hub.subscribe();
    let shutdown = state.sync_hub.shutdown_token().clone();

    // hello：带上当前资源版本，客户端据此决定是否需要先全量拉取
    if send_envelope(&mut sink, &hello(&state)).await.is_err() {
        return;
    }

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,

            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }

            // Incoming frame from client: only Close matters
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!("Sync WS read error: {e}");
                        break;
                    }
                    _ => {} // Text/Binary/Ping/Pong — ignore
                }
            }

            event = rx.recv() => {
                match event {
                    Ok(payload) => {
                        if filter.matches(&payload)
                            && send_envelope(&mut sink, &SyncEnvelope::Sync(payload)).await.is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "Sync subscriber lagged, resending hello");
                        // 重新订阅，跳到当前位置；客户端收到 hello 后全量刷新
                        rx = state.sync_hub.subscribe();
                        if send_envelope(&mut sink, &hello(&state)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    // Send Close frame (best-effort)
    let _ = sink.close().await;
    tracing::info!(table_id = ?filter.table_id, "Sync WS disconnected");
}

fn hello(state: &ServerState) -> SyncEnvelope {
    SyncEnvelope::Hello {
        versions: state.versions_snapshot(),
    }
}

async fn send_envelope(
    sink: &mut (impl SinkExt<Message> + Unpin),
    envelope: &SyncEnvelope,
) -> Result<(), ()> {
    let json = envelope.to_json().map_err(|_| ())?;
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}

pub fn router() -> axum::Router<ServerState> {
    axum::Router::new().route("/api/sync/ws", axum::routing::get(handle_sync_ws))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(resource: &str, table_id: Option<i64>) -> SyncPayload {
        SyncPayload {
            resource: resource.to_string(),
            version: 1,
            action: "created".to_string(),
            id: "1".to_string(),
            table_id,
            data: None,
        }
    }

    fn filter(table_id: Option<i64>, resources: Option<&str>) -> SyncFilter {
        SyncFilter::from_query(&SyncQuery {
            table_id,
            resources: resources.map(|s| s.to_string()),
        })
    }

    #[test]
    fn unfiltered_connection_sees_everything() {
        let f = filter(None, None);
        assert!(f.matches(&payload("order", Some(7))));
        assert!(f.matches(&payload("product", None)));
        assert!(f.matches(&payload("staff_call", Some(3))));
    }

    #[test]
    fn table_filter_scopes_table_bound_events() {
        let f = filter(Some(7), None);
        assert!(f.matches(&payload("order", Some(7))));
        assert!(!f.matches(&payload("order", Some(8))));
        // catalog events pass through to every table
        assert!(f.matches(&payload("product", None)));
    }

    #[test]
    fn resource_filter_is_an_allow_list() {
        let f = filter(None, Some("order, order_item"));
        assert!(f.matches(&payload("order", Some(1))));
        assert!(f.matches(&payload("order_item", Some(1))));
        assert!(!f.matches(&payload("staff_call", Some(1))));
    }

    #[test]
    fn filters_compose() {
        let f = filter(Some(7), Some("order"));
        assert!(f.matches(&payload("order", Some(7))));
        assert!(!f.matches(&payload("order", Some(9))));
        assert!(!f.matches(&payload("staff_call", Some(7))));
    }
}
