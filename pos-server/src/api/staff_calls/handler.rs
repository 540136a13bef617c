//! Staff Call API Handlers (管理端)

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::staff_call;
use crate::utils::AppResult;
use shared::models::{ActionResult, StaffCallWithTable};

const RESOURCE: &str = "staff_call";

/// GET /api/staff-calls - 待处理的呼叫（含桌台/区域名）
pub async fn list_pending(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<StaffCallWithTable>>> {
    let calls = staff_call::find_pending(&state.pool).await?;
    Ok(Json(calls))
}

/// POST /api/staff-calls/:id/complete - 标记呼叫已处理
///
/// 软结果：呼叫已被别的员工处理过时返回 success=false 而非 404。
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ActionResult>> {
    let completed = staff_call::complete(&state.pool, id).await?;

    if !completed {
        return Ok(Json(ActionResult::failed(
            "Staff call already completed or not found",
        )));
    }

    let call = staff_call::find_by_id(&state.pool, id).await?;
    let table_id = call.as_ref().map(|c| c.table_id);
    state.broadcast_sync(RESOURCE, "updated", id, table_id, call.as_ref());

    Ok(Json(ActionResult::ok()))
}
