//! Store Settings Repository (Singleton)

use super::RepoResult;
use shared::models::{StoreSettings, StoreSettingsUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const SINGLETON_ID: i64 = 1;

pub async fn get(pool: &SqlitePool) -> RepoResult<Option<StoreSettings>> {
    let settings = sqlx::query_as::<_, StoreSettings>(
        "SELECT id, store_name, address, phone, wifi_pass, updated_at \
         FROM store_settings WHERE id = ?",
    )
    .bind(SINGLETON_ID)
    .fetch_optional(pool)
    .await?;
    Ok(settings)
}

/// Get the singleton settings, falling back to defaults without writing
/// (the row is only materialized by the first update)
pub async fn get_or_default(pool: &SqlitePool) -> RepoResult<StoreSettings> {
    Ok(get(pool).await?.unwrap_or_default())
}

/// Upsert the singleton row, merging unset fields from the current state
pub async fn update(pool: &SqlitePool, data: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
    let current = get_or_default(pool).await?;

    let merged = StoreSettings {
        id: SINGLETON_ID,
        store_name: data.store_name.unwrap_or(current.store_name),
        address: data.address.unwrap_or(current.address),
        phone: data.phone.unwrap_or(current.phone),
        wifi_pass: data.wifi_pass.unwrap_or(current.wifi_pass),
        updated_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO store_settings (id, store_name, address, phone, wifi_pass, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT(id) DO UPDATE SET \
             store_name = ?2, address = ?3, phone = ?4, wifi_pass = ?5, updated_at = ?6",
    )
    .bind(merged.id)
    .bind(&merged.store_name)
    .bind(&merged.address)
    .bind(&merged.phone)
    .bind(&merged.wifi_pass)
    .bind(merged.updated_at)
    .execute(pool)
    .await?;

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn defaults_before_first_update() {
        let db = DbService::in_memory().await.unwrap();

        let settings = get_or_default(&db.pool).await.unwrap();
        assert_eq!(settings.store_name, "Local Cafe");

        // still no row persisted
        assert!(get(&db.pool).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_upserts_and_merges() {
        let db = DbService::in_memory().await.unwrap();

        let updated = update(
            &db.pool,
            StoreSettingsUpdate {
                store_name: Some("Bean There".into()),
                address: Some("12 Roast St".into()),
                phone: None,
                wifi_pass: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.store_name, "Bean There");

        // second partial update keeps earlier values
        let updated = update(
            &db.pool,
            StoreSettingsUpdate {
                store_name: None,
                address: None,
                phone: Some("555-0199".into()),
                wifi_pass: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.store_name, "Bean There");
        assert_eq!(updated.address, "12 Roast St");
        assert_eq!(updated.phone, "555-0199");

        let persisted = get(&db.pool).await.unwrap().unwrap();
        assert_eq!(persisted.phone, "555-0199");
    }
}
