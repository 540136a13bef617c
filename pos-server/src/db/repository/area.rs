//! Area Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Area, AreaCreate, AreaUpdate, AreaWithCount, DiningTable};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AreaWithCount>> {
    let areas = sqlx::query_as::<_, AreaWithCount>(
        "SELECT a.id, a.name, a.created_at, COUNT(t.id) AS table_count \
         FROM area a LEFT JOIN dining_table t ON t.area_id = a.id \
         GROUP BY a.id ORDER BY a.created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(areas)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Area>> {
    let area = sqlx::query_as::<_, Area>("SELECT id, name, created_at FROM area WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(area)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Area>> {
    let area = sqlx::query_as::<_, Area>(
        "SELECT id, name, created_at FROM area WHERE name = ? COLLATE NOCASE LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(area)
}

pub async fn create(pool: &SqlitePool, data: AreaCreate) -> RepoResult<Area> {
    let name = data.name.trim().to_string();

    if find_by_name(pool, &name).await?.is_some() {
        return Err(RepoError::Domain(ErrorCode::AreaNameExists));
    }

    let id = snowflake_id();
    sqlx::query("INSERT INTO area (id, name, created_at) VALUES (?, ?, ?)")
        .bind(id)
        .bind(&name)
        .bind(now_millis())
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create area".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AreaUpdate) -> RepoResult<Area> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name.trim()).await?
        && found.id != id
    {
        return Err(RepoError::Domain(ErrorCode::AreaNameExists));
    }

    let name = data.name.map(|n| n.trim().to_string());
    let rows = sqlx::query("UPDATE area SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::AreaNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Domain(ErrorCode::AreaNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Check for remaining dining tables
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table WHERE area_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Domain(ErrorCode::AreaHasTables));
    }

    let rows = sqlx::query("DELETE FROM area WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::AreaNotFound));
    }
    Ok(true)
}

pub async fn find_tables(pool: &SqlitePool, area_id: i64) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, area_id, is_available, created_at \
         FROM dining_table WHERE area_id = ? ORDER BY name",
    )
    .bind(area_id)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}
