//! QR Export API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/tables/{id}/qr.png", get(handler::table_qr_png))
        .route("/api/areas/{id}/qr.zip", get(handler::area_qr_zip))
}
