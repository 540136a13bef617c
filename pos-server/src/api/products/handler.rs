//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use shared::models::{Product, ProductCreate, ProductUpdate, ProductWithCategory};

const RESOURCE: &str = "product";

/// Query params for listing products
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category_id: Option<i64>,
}

/// GET /api/products - 获取商品列表（管理端，含下架商品）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ProductWithCategory>>> {
    let products = product::find_all(&state.pool, query.category_id).await?;
    Ok(Json(products))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let product = product::create(&state.pool, payload).await?;

    state.broadcast_sync(RESOURCE, "created", product.id, None, Some(&product));

    Ok(Json(product))
}

/// PUT /api/products/:id - 更新商品（部分字段）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let product = product::update(&state.pool, id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", id, None, Some(&product));

    Ok(Json(product))
}

/// DELETE /api/products/:id - 下架商品 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = product::deactivate(&state.pool, id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None, None);
    }

    Ok(Json(result))
}
