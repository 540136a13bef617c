//! Store Settings API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::store_settings;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};
use shared::models::{StoreSettings, StoreSettingsUpdate};

const RESOURCE: &str = "store_settings";

/// GET /api/store-settings - 店铺信息（无记录时返回默认值）
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<StoreSettings>> {
    let settings = store_settings::get_or_default(&state.pool).await?;
    Ok(Json(settings))
}

/// PUT /api/store-settings - 更新店铺信息 (upsert)
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettings>> {
    validate_optional_text(&payload.store_name, "store_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.wifi_pass, "wifi_pass", MAX_SHORT_TEXT_LEN)?;

    let settings = store_settings::update(&state.pool, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", settings.id, None, Some(&settings));

    Ok(Json(settings))
}
