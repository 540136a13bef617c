//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableWithArea};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, area_id, is_available, created_at FROM dining_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Find table by id with its area name joined (customer menu header)
pub async fn find_with_area(pool: &SqlitePool, id: i64) -> RepoResult<Option<TableWithArea>> {
    let table = sqlx::query_as::<_, TableWithArea>(
        "SELECT t.id, t.name, t.area_id, a.name AS area_name, t.is_available \
         FROM dining_table t JOIN area a ON a.id = t.area_id WHERE t.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_by_name_in_area(
    pool: &SqlitePool,
    area_id: i64,
    name: &str,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, area_id, is_available, created_at \
         FROM dining_table WHERE area_id = ? AND name = ? COLLATE NOCASE LIMIT 1",
    )
    .bind(area_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let name = data.name.trim().to_string();

    if super::area::find_by_id(pool, data.area_id).await?.is_none() {
        return Err(RepoError::Domain(ErrorCode::AreaNotFound));
    }

    // Check duplicate name in same area
    if find_by_name_in_area(pool, data.area_id, &name)
        .await?
        .is_some()
    {
        return Err(RepoError::Domain(ErrorCode::TableNameExists));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, name, area_id, is_available, created_at) \
         VALUES (?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(&name)
    .bind(data.area_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or(RepoError::Domain(ErrorCode::TableNotFound))?;

    // Check duplicate name in area if changing name or area
    let check_area = data.area_id.unwrap_or(existing.area_id);
    let check_name = data.name.as_deref().unwrap_or(&existing.name).trim();

    if data.name.is_some() || data.area_id.is_some() {
        if data.area_id.is_some()
            && super::area::find_by_id(pool, check_area).await?.is_none()
        {
            return Err(RepoError::Domain(ErrorCode::AreaNotFound));
        }
        if let Some(found) = find_by_name_in_area(pool, check_area, check_name).await?
            && found.id != id
        {
            return Err(RepoError::Domain(ErrorCode::TableNameExists));
        }
    }

    let name = data.name.map(|n| n.trim().to_string());
    sqlx::query(
        "UPDATE dining_table SET \
             name = COALESCE(?1, name), \
             area_id = COALESCE(?2, area_id), \
             is_available = COALESCE(?3, is_available) \
         WHERE id = ?4",
    )
    .bind(name)
    .bind(data.area_id)
    .bind(data.is_available)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(RepoError::Domain(ErrorCode::TableNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::TableNotFound));
    }
    Ok(true)
}
