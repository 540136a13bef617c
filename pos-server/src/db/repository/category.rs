//! Category Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, name, created_at FROM category ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>("SELECT id, name, created_at FROM category WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, created_at FROM category WHERE name = ? COLLATE NOCASE LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let name = data.name.trim().to_string();

    if find_by_name(pool, &name).await?.is_some() {
        return Err(RepoError::Domain(ErrorCode::CategoryNameExists));
    }

    let id = snowflake_id();
    sqlx::query("INSERT INTO category (id, name, created_at) VALUES (?, ?, ?)")
        .bind(id)
        .bind(&name)
        .bind(now_millis())
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name.trim()).await?
        && found.id != id
    {
        return Err(RepoError::Domain(ErrorCode::CategoryNameExists));
    }

    let name = data.name.map(|n| n.trim().to_string());
    let rows = sqlx::query("UPDATE category SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::CategoryNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or(RepoError::Domain(ErrorCode::CategoryNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Check for products still assigned (active or not)
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Domain(ErrorCode::CategoryHasProducts));
    }

    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::CategoryNotFound));
    }
    Ok(true)
}
