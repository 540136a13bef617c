//! QR Export handlers — 桌台点单二维码 PNG / 按区域 ZIP

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::core::ServerState;
use crate::db::repository::{area, dining_table};
use crate::qr;
use crate::utils::{AppError, AppResult};

/// GET /api/tables/:id/qr.png - 单桌二维码
pub async fn table_qr_png(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let table = dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id}")))?;

    let url = state.config.order_page_url(table.id);
    let png = qr::render_qr_png(&url)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"QR_{}.png\"", table.id),
            ),
        ],
        png,
    ))
}

/// GET /api/areas/:id/qr.zip - 区域内全部桌台的二维码打包
pub async fn area_qr_zip(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let area_row = area::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Area {id}")))?;

    let tables = area::find_tables(&state.pool, id).await?;
    let entries: Vec<(String, String)> = tables
        .iter()
        .map(|t| (t.name.clone(), state.config.order_page_url(t.id)))
        .collect();

    let zip_bytes = qr::render_qr_archive(&entries)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"QR_{}.zip\"",
                    area_row.name.replace('"', "_")
                ),
            ),
        ],
        zip_bytes,
    ))
}
