//! Staff Call API 模块 (管理端)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/staff-calls", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_pending))
        .route("/{id}/complete", axum::routing::post(handler::complete))
}
