//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

const RESOURCE: &str = "category";

/// GET /api/categories - 获取所有分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let cat = category::create(&state.pool, payload).await?;

    state.broadcast_sync(RESOURCE, "created", cat.id, None, Some(&cat));

    Ok(Json(cat))
}

/// PUT /api/categories/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let cat = category::update(&state.pool, id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", id, None, Some(&cat));

    Ok(Json(cat))
}

/// DELETE /api/categories/:id - 删除分类（仍有商品时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = category::delete(&state.pool, id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None, None);
    }

    Ok(Json(result))
}
