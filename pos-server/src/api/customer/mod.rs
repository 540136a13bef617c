//! Customer API 模块 (扫码点单页)
//!
//! 所有路由都挂在 `/api/customer/tables/{table_id}` 下。顾客的
//! 身份就是桌台（二维码里只有 table id，没有账号体系）。

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customer/tables/{table_id}", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/menu", get(handler::menu))
        .route("/orders", get(handler::list_orders).post(handler::submit_order))
        .route("/orders/{order_id}/cancel", post(handler::cancel_order))
        .route("/staff-call", post(handler::call_staff))
}
