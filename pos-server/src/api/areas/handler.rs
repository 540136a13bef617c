//! Area API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::area;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::AppResult;
use shared::models::{Area, AreaCreate, AreaUpdate, AreaWithCount, DiningTable};

const RESOURCE: &str = "area";

/// GET /api/areas - 获取所有区域（含桌台数）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AreaWithCount>>> {
    let areas = area::find_all(&state.pool).await?;
    Ok(Json(areas))
}

/// POST /api/areas - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AreaCreate>,
) -> AppResult<Json<Area>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let area = area::create(&state.pool, payload).await?;

    state.broadcast_sync(RESOURCE, "created", area.id, None, Some(&area));

    Ok(Json(area))
}

/// PUT /api/areas/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AreaUpdate>,
) -> AppResult<Json<Area>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let area = area::update(&state.pool, id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", id, None, Some(&area));

    Ok(Json(area))
}

/// DELETE /api/areas/:id - 删除区域（仍有桌台时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = area::delete(&state.pool, id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None, None);
    }

    Ok(Json(result))
}

/// GET /api/areas/:id/tables - 获取区域内的所有桌台
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(area_id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = area::find_tables(&state.pool, area_id).await?;
    Ok(Json(tables))
}
