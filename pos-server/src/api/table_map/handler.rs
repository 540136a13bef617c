//! Table Map Handlers
//!
//! 楼面图是读时聚合：每次请求重新从活跃订单推导桌台状态，
//! 不维护增量计数器。新鲜度完全取决于刷新频率（前端订阅
//! sync feed，收到 order 变更后重新拉取）。

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::{area, order};
use crate::utils::AppResult;
use shared::models::{AreaMap, DiningTable, OrderStatus, TableActivity, TableOccupancy};
use shared::util::now_millis;

/// GET /api/table-map - 按区域返回桌台占用状态
pub async fn table_map(State(state): State<ServerState>) -> AppResult<Json<Vec<AreaMap>>> {
    let areas = area::find_all(&state.pool).await?;
    let stats = order::find_active_stats(&state.pool).await?;
    let now = now_millis();

    let mut result = Vec::with_capacity(areas.len());
    for a in areas {
        let tables = area::find_tables(&state.pool, a.id).await?;
        result.push(AreaMap {
            id: a.id,
            name: a.name,
            tables: tables
                .iter()
                .map(|t| derive_table_status(t, &stats, now))
                .collect(),
        });
    }

    Ok(Json(result))
}

/// 从活跃订单推导单个桌台的状态
///
/// - occupied ⇔ 存在 {pending, preparing, served} 状态的订单
/// - duration = now − 最早活跃订单的 created_at（分钟）
/// - total_amount = 活跃订单金额之和
/// - item_count = 仍在 {pending, preparing} 的订单的条目数量之和
pub(crate) fn derive_table_status(
    table: &DiningTable,
    stats: &[order::ActiveOrderStat],
    now: i64,
) -> TableOccupancy {
    let table_orders: Vec<_> = stats.iter().filter(|s| s.table_id == table.id).collect();

    if table_orders.is_empty() {
        return TableOccupancy {
            id: table.id,
            name: table.name.clone(),
            is_available: table.is_available,
            status: TableActivity::Empty,
            duration_minutes: 0,
            total_amount: 0,
            item_count: 0,
        };
    }

    let earliest = table_orders.iter().map(|s| s.created_at).min().unwrap_or(now);
    let duration_minutes = ((now - earliest) / 60_000).max(0);
    let total_amount = table_orders.iter().map(|s| s.total_amount).sum();
    let item_count = table_orders
        .iter()
        .filter(|s| matches!(s.status, OrderStatus::Pending | OrderStatus::Preparing))
        .map(|s| s.item_count)
        .sum();

    TableOccupancy {
        id: table.id,
        name: table.name.clone(),
        is_available: table.is_available,
        status: TableActivity::Occupied,
        duration_minutes,
        total_amount,
        item_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::order::ActiveOrderStat;

    fn table(id: i64) -> DiningTable {
        DiningTable {
            id,
            name: format!("T{id}"),
            area_id: 1,
            is_available: true,
            created_at: 0,
        }
    }

    fn stat(table_id: i64, status: OrderStatus, total: i64, created_at: i64, items: i64) -> ActiveOrderStat {
        ActiveOrderStat {
            order_id: created_at, // unique enough for tests
            table_id,
            status,
            total_amount: total,
            created_at,
            item_count: items,
        }
    }

    #[test]
    fn empty_table_reports_zeroes() {
        let derived = derive_table_status(&table(1), &[], 1_000_000);
        assert_eq!(derived.status, TableActivity::Empty);
        assert_eq!(derived.duration_minutes, 0);
        assert_eq!(derived.total_amount, 0);
        assert_eq!(derived.item_count, 0);
    }

    #[test]
    fn occupied_table_sums_orders_and_uses_earliest_start() {
        let now = 30 * 60_000;
        let stats = vec![
            stat(1, OrderStatus::Pending, 50_000, 10 * 60_000, 2),
            stat(1, OrderStatus::Served, 40_000, 5 * 60_000, 1),
            // another table, must be ignored
            stat(2, OrderStatus::Pending, 99_000, 0, 9),
        ];

        let derived = derive_table_status(&table(1), &stats, now);
        assert_eq!(derived.status, TableActivity::Occupied);
        // earliest active order started at minute 5
        assert_eq!(derived.duration_minutes, 25);
        assert_eq!(derived.total_amount, 90_000);
    }

    #[test]
    fn item_count_skips_served_orders() {
        let stats = vec![
            stat(1, OrderStatus::Pending, 0, 0, 2),
            stat(1, OrderStatus::Preparing, 0, 0, 3),
            stat(1, OrderStatus::Served, 0, 0, 7),
        ];

        let derived = derive_table_status(&table(1), &stats, 60_000);
        // served items already reached the table
        assert_eq!(derived.item_count, 5);
    }
}
