//! Order API Handlers (管理端)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::str::FromStr;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, PaginationParams};
use shared::models::{Order, OrderDetail, OrderStatus, OrderStatusUpdate, OrderSubmit};

const RESOURCE: &str = "order";
const ITEM_RESOURCE: &str = "order_item";

/// GET /api/orders - 全部订单（分页，最新在前）
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = order::find_all(
        &state.pool,
        params.limit() as i64,
        params.offset() as i64,
    )
    .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 单个订单（含条目）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(detail))
}

/// PUT /api/orders/:id/status - 状态流转（状态按钮）
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let status = OrderStatus::from_str(&payload.status)?;
    let updated = order::set_status(&state.pool, id, status).await?;

    state.broadcast_sync(
        RESOURCE,
        "updated",
        id,
        Some(updated.table_id),
        Some(&updated),
    );

    Ok(Json(updated))
}

/// POST /api/orders/table/:table_id/items - 给桌台的活跃订单加菜
///
/// 桌台没有活跃订单时自动开一张 pending 订单。
pub async fn add_items(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
    Json(payload): Json<OrderSubmit>,
) -> AppResult<Json<OrderDetail>> {
    for item in &payload.items {
        validate_optional_text(&item.note, "note", MAX_NOTE_LEN)?;
    }

    let outcome = order::append_to_active(&state.pool, table_id, &payload.items).await?;
    let detail = outcome.detail;

    if outcome.created {
        // Fresh order: one event carrying the joined record
        state.broadcast_sync(RESOURCE, "created", detail.id, Some(table_id), Some(&detail));
    } else {
        // Existing order extended: item inserts plus the updated order
        for item_id in &outcome.new_item_ids {
            let item = detail.items.iter().find(|i| i.id == *item_id);
            state.broadcast_sync(ITEM_RESOURCE, "created", *item_id, Some(table_id), item);
        }
        state.broadcast_sync(RESOURCE, "updated", detail.id, Some(table_id), Some(&detail));
    }

    Ok(Json(detail))
}
