//! Staff Call Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{StaffCall, StaffCallWithTable};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Default note when the customer presses the bell without typing
pub const DEFAULT_NOTE: &str = "Customer needs assistance";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StaffCall>> {
    let call = sqlx::query_as::<_, StaffCall>(
        "SELECT id, table_id, note, status, created_at FROM staff_call WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(call)
}

/// Pending calls with table/area names, newest first (admin bell list)
pub async fn find_pending(pool: &SqlitePool) -> RepoResult<Vec<StaffCallWithTable>> {
    let calls = sqlx::query_as::<_, StaffCallWithTable>(
        "SELECT c.id, c.table_id, t.name AS table_name, a.name AS area_name, \
                c.note, c.status, c.created_at \
         FROM staff_call c \
         JOIN dining_table t ON t.id = c.table_id \
         JOIN area a ON a.id = t.area_id \
         WHERE c.status = 'pending' ORDER BY c.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(calls)
}

pub async fn create(
    pool: &SqlitePool,
    table_id: i64,
    note: Option<String>,
) -> RepoResult<StaffCall> {
    if super::dining_table::find_by_id(pool, table_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Domain(ErrorCode::TableNotFound));
    }

    let note = match note {
        Some(n) if !n.trim().is_empty() => n,
        _ => DEFAULT_NOTE.to_string(),
    };

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO staff_call (id, table_id, note, status, created_at) \
         VALUES (?, ?, ?, 'pending', ?)",
    )
    .bind(id)
    .bind(table_id)
    .bind(&note)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff call".into()))
}

/// Mark a pending call completed. Returns false when the call was
/// already completed (or never existed); the caller turns that into a
/// soft failure, not an HTTP error.
pub async fn complete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE staff_call SET status = 'completed' WHERE id = ? AND status = 'pending'",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{AreaCreate, DiningTableCreate, StaffCallStatus};

    async fn seed_table(pool: &SqlitePool) -> i64 {
        let area = crate::db::repository::area::create(pool, AreaCreate { name: "Hall".into() })
            .await
            .unwrap();
        crate::db::repository::dining_table::create(
            pool,
            DiningTableCreate {
                name: "T1".into(),
                area_id: area.id,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn call_lifecycle() {
        let db = DbService::in_memory().await.unwrap();
        let table_id = seed_table(&db.pool).await;

        let call = create(&db.pool, table_id, Some("Extra napkins".into()))
            .await
            .unwrap();
        assert_eq!(call.status, StaffCallStatus::Pending);
        assert_eq!(call.note, "Extra napkins");

        let pending = find_pending(&db.pool).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].table_name, "T1");
        assert_eq!(pending[0].area_name, "Hall");

        assert!(complete(&db.pool, call.id).await.unwrap());
        assert!(find_pending(&db.pool).await.unwrap().is_empty());

        // second complete is a soft no-op
        assert!(!complete(&db.pool, call.id).await.unwrap());
    }

    #[tokio::test]
    async fn empty_note_falls_back_to_default() {
        let db = DbService::in_memory().await.unwrap();
        let table_id = seed_table(&db.pool).await;

        let call = create(&db.pool, table_id, Some("   ".into())).await.unwrap();
        assert_eq!(call.note, DEFAULT_NOTE);

        let call = create(&db.pool, table_id, None).await.unwrap();
        assert_eq!(call.note, DEFAULT_NOTE);
    }

    #[tokio::test]
    async fn unknown_table_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let err = create(&db.pool, 999, None).await.unwrap_err();
        assert!(matches!(err, RepoError::Domain(ErrorCode::TableNotFound)));
    }
}
