//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableWithArea};

const RESOURCE: &str = "dining_table";

/// GET /api/tables/:id - 获取单个桌台（含区域名）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TableWithArea>> {
    let table = dining_table::find_with_area(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id}")))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let table = dining_table::create(&state.pool, payload).await?;

    state.broadcast_sync(RESOURCE, "created", table.id, None, Some(&table));

    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台（改名 / 换区域 / 可用开关）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let table = dining_table::update(&state.pool, id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", id, None, Some(&table));

    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = dining_table::delete(&state.pool, id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None, None);
    }

    Ok(Json(result))
}
