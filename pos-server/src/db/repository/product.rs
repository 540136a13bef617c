//! Product Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Product, ProductCreate, ProductUpdate, ProductWithCategory};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, category_id, name, price, base_cost, image_url, is_active, created_at";

/// Admin menu list: all products (inactive included) with category names,
/// optionally filtered by category
pub async fn find_all(
    pool: &SqlitePool,
    category_id: Option<i64>,
) -> RepoResult<Vec<ProductWithCategory>> {
    let base = "SELECT p.id, p.category_id, c.name AS category_name, p.name, p.price, \
                p.base_cost, p.image_url, p.is_active, p.created_at \
                FROM product p JOIN category c ON c.id = p.category_id";

    let products = match category_id {
        Some(cat) => {
            sqlx::query_as::<_, ProductWithCategory>(&format!(
                "{base} WHERE p.category_id = ? ORDER BY p.name"
            ))
            .bind(cat)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ProductWithCategory>(&format!("{base} ORDER BY p.name"))
                .fetch_all(pool)
                .await?
        }
    };
    Ok(products)
}

/// Customer menu: active products only
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM product WHERE is_active = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM product WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(product)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM product WHERE name = ? COLLATE NOCASE LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let name = data.name.trim().to_string();

    if data.price < 0 {
        return Err(RepoError::Validation("Price cannot be negative".into()));
    }
    if super::category::find_by_id(pool, data.category_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Domain(ErrorCode::CategoryNotFound));
    }
    if find_by_name(pool, &name).await?.is_some() {
        return Err(RepoError::Domain(ErrorCode::ProductNameExists));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO product (id, category_id, name, price, base_cost, image_url, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(&name)
    .bind(data.price)
    .bind(data.base_cost.unwrap_or(0))
    .bind(data.image_url)
    .bind(data.is_active.unwrap_or(true))
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if let Some(price) = data.price
        && price < 0
    {
        return Err(RepoError::Validation("Price cannot be negative".into()));
    }
    if let Some(cat) = data.category_id
        && super::category::find_by_id(pool, cat).await?.is_none()
    {
        return Err(RepoError::Domain(ErrorCode::CategoryNotFound));
    }
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name.trim()).await?
        && found.id != id
    {
        return Err(RepoError::Domain(ErrorCode::ProductNameExists));
    }

    let name = data.name.map(|n| n.trim().to_string());
    let rows = sqlx::query(
        "UPDATE product SET \
             category_id = COALESCE(?1, category_id), \
             name = COALESCE(?2, name), \
             price = COALESCE(?3, price), \
             base_cost = COALESCE(?4, base_cost), \
             image_url = COALESCE(?5, image_url), \
             is_active = COALESCE(?6, is_active) \
         WHERE id = ?7",
    )
    .bind(data.category_id)
    .bind(name)
    .bind(data.price)
    .bind(data.base_cost)
    .bind(data.image_url)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::ProductNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or(RepoError::Domain(ErrorCode::ProductNotFound))
}

/// Soft delete: the product disappears from menus but stays referenced
/// by historic order items
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE product SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::ProductNotFound));
    }
    Ok(true)
}
