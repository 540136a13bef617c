//! Order API 模块 (管理端)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", axum::routing::put(handler::update_status))
        .route("/table/{table_id}/items", axum::routing::post(handler::add_items))
}
