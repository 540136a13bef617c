//! Customer API Handlers (扫码点单页)

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{
    RepoError, category, dining_table, order, product, staff_call, store_settings,
};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    ActionResult, Category, OrderDetail, OrderSubmit, Product, StaffCallCreate, StoreSettings,
    TableWithArea,
};
use shared::util::now_millis;

const RESOURCE: &str = "order";

/// 点单页首屏数据：桌台 + 菜单 + 店铺信息，一次请求拉全
#[derive(Debug, Serialize)]
pub struct CustomerMenu {
    pub table: TableWithArea,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub store: StoreSettings,
}

/// 桌台存在性检查（下架桌台对顾客等同不存在）
async fn require_table(state: &ServerState, table_id: i64) -> AppResult<TableWithArea> {
    let table = dining_table::find_with_area(&state.pool, table_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    if !table.is_available {
        return Err(AppError::new(ErrorCode::TableUnavailable));
    }
    Ok(table)
}

/// GET /api/customer/tables/:table_id/menu - 点单页首屏
pub async fn menu(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
) -> AppResult<Json<CustomerMenu>> {
    let table = require_table(&state, table_id).await?;
    let categories = category::find_all(&state.pool).await?;
    let products = product::find_active(&state.pool).await?;
    let store = store_settings::get_or_default(&state.pool).await?;

    Ok(Json(CustomerMenu {
        table,
        categories,
        products,
        store,
    }))
}

/// GET /api/customer/tables/:table_id/orders - 本桌近 24h 未完结订单
pub async fn list_orders(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    require_table(&state, table_id).await?;

    let since = now_millis() - state.config.order_history_hours * 60 * 60 * 1000;
    let orders = order::find_recent_by_table(&state.pool, table_id, since).await?;
    Ok(Json(orders))
}

/// POST /api/customer/tables/:table_id/orders - 提交购物车
///
/// 服务端按当前菜单重新定价，订单和条目在一个事务里落库。
pub async fn submit_order(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
    Json(payload): Json<OrderSubmit>,
) -> AppResult<Json<OrderDetail>> {
    require_table(&state, table_id).await?;
    for item in &payload.items {
        validate_optional_text(&item.note, "note", MAX_NOTE_LEN)?;
    }

    let detail = order::submit(&state.pool, table_id, &payload.items).await?;

    state.broadcast_sync(RESOURCE, "created", detail.id, Some(table_id), Some(&detail));

    Ok(Json(detail))
}

/// POST /api/customer/tables/:table_id/orders/:order_id/cancel
///
/// 软结果：只有 pending 订单能取消，其余情况返回 success=false。
pub async fn cancel_order(
    State(state): State<ServerState>,
    Path((table_id, order_id)): Path<(i64, i64)>,
) -> AppResult<Json<ActionResult>> {
    // 只能取消本桌的订单
    match order::find_by_id(&state.pool, order_id).await? {
        Some(o) if o.table_id == table_id => {}
        _ => return Ok(Json(ActionResult::failed("Order not found"))),
    }

    match order::cancel_if_pending(&state.pool, order_id).await {
        Ok(cancelled) => {
            state.broadcast_sync(
                RESOURCE,
                "updated",
                order_id,
                Some(table_id),
                Some(&cancelled),
            );
            Ok(Json(ActionResult::ok()))
        }
        Err(RepoError::Domain(code @ ErrorCode::OrderNotCancellable))
        | Err(RepoError::Domain(code @ ErrorCode::OrderNotFound)) => {
            Ok(Json(ActionResult::failed(code.message())))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/customer/tables/:table_id/staff-call - 呼叫服务员
pub async fn call_staff(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
    Json(payload): Json<StaffCallCreate>,
) -> AppResult<Json<ActionResult>> {
    require_table(&state, table_id).await?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let call = staff_call::create(&state.pool, table_id, payload.note).await?;

    state.broadcast_sync("staff_call", "created", call.id, Some(table_id), Some(&call));

    Ok(Json(ActionResult::ok()))
}
