//! Table Map API 模块 (管理端楼面图)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/table-map", get(handler::table_map))
}
