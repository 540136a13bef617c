//! Health API

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    /// Seconds since process start
    pub uptime_secs: i64,
}

/// GET /api/health - 健康检查
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let uptime_secs = (shared::util::now_millis() - state.started_at) / 1000;
    Json(HealthResponse {
        status: "ok",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs,
    })
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}
