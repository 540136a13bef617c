//! Order Repository
//!
//! Order submission writes the order row, its items, and the computed
//! total in a single transaction; totals always come from the current
//! product prices, never from the client. Status guards use
//! conditional UPDATEs so check-and-set is atomic.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Order, OrderDetail, OrderItem, OrderItemDraft, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const ORDER_COLUMNS: &str = "id, table_id, status, total_amount, created_at, updated_at";

const DETAIL_SELECT: &str = "SELECT o.id, o.table_id, t.name AS table_name, a.name AS area_name, \
     o.status, o.total_amount, o.created_at, o.updated_at \
     FROM orders o \
     JOIN dining_table t ON t.id = o.table_id \
     JOIN area a ON a.id = t.area_id";

/// Order row joined with table/area names (items fetched separately)
#[derive(Debug, sqlx::FromRow)]
struct OrderHead {
    id: i64,
    table_id: i64,
    table_name: String,
    area_name: String,
    status: OrderStatus,
    total_amount: i64,
    created_at: i64,
    updated_at: i64,
}

impl OrderHead {
    fn into_detail(self, items: Vec<OrderItem>) -> OrderDetail {
        OrderDetail {
            id: self.id,
            table_id: self.table_id,
            table_name: self.table_name,
            area_name: self.area_name,
            status: self.status,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        }
    }
}

/// Per-order stats over active orders (admin table map)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActiveOrderStat {
    pub order_id: i64,
    pub table_id: i64,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub created_at: i64,
    pub item_count: i64,
}

async fn fetch_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT i.id, i.order_id, i.product_id, p.name AS product_name, \
                i.quantity, i.note, i.price_at_order \
         FROM order_item i JOIN product p ON p.id = i.product_id \
         WHERE i.order_id = ? ORDER BY i.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Full joined record for one order (the unit of realtime refetches)
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let head = sqlx::query_as::<_, OrderHead>(&format!("{DETAIL_SELECT} WHERE o.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match head {
        Some(head) => {
            let items = fetch_items(pool, head.id).await?;
            Ok(Some(head.into_detail(items)))
        }
        None => Ok(None),
    }
}

/// Admin order list, newest first, paginated
pub async fn find_all(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<OrderDetail>> {
    let heads = sqlx::query_as::<_, OrderHead>(&format!(
        "{DETAIL_SELECT} ORDER BY o.created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut details = Vec::with_capacity(heads.len());
    for head in heads {
        let items = fetch_items(pool, head.id).await?;
        details.push(head.into_detail(items));
    }
    Ok(details)
}

/// A table's recent non-terminal orders (customer order history)
pub async fn find_recent_by_table(
    pool: &SqlitePool,
    table_id: i64,
    since_millis: i64,
) -> RepoResult<Vec<OrderDetail>> {
    let heads = sqlx::query_as::<_, OrderHead>(&format!(
        "{DETAIL_SELECT} \
         WHERE o.table_id = ? AND o.status NOT IN ('paid', 'cancelled') AND o.created_at > ? \
         ORDER BY o.created_at DESC"
    ))
    .bind(table_id)
    .bind(since_millis)
    .fetch_all(pool)
    .await?;

    let mut details = Vec::with_capacity(heads.len());
    for head in heads {
        let items = fetch_items(pool, head.id).await?;
        details.push(head.into_detail(items));
    }
    Ok(details)
}

/// Price one draft line against the live menu (inside the submit tx)
async fn price_line(
    tx: &mut sqlx::SqliteConnection,
    draft: &OrderItemDraft,
) -> RepoResult<i64> {
    if draft.quantity <= 0 {
        return Err(RepoError::Validation(
            "Quantity must be greater than zero".into(),
        ));
    }

    let row: Option<(i64, bool)> =
        sqlx::query_as("SELECT price, is_active FROM product WHERE id = ?")
            .bind(draft.product_id)
            .fetch_optional(&mut *tx)
            .await?;

    match row {
        None => Err(RepoError::Domain(ErrorCode::ProductNotFound)),
        Some((_, false)) => Err(RepoError::Domain(ErrorCode::ProductInactive)),
        Some((price, true)) => Ok(price),
    }
}

async fn insert_item(
    tx: &mut sqlx::SqliteConnection,
    order_id: i64,
    draft: &OrderItemDraft,
    price_at_order: i64,
) -> RepoResult<i64> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, product_id, quantity, note, price_at_order) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(order_id)
    .bind(draft.product_id)
    .bind(draft.quantity)
    .bind(draft.note.as_deref().unwrap_or(""))
    .bind(price_at_order)
    .execute(&mut *tx)
    .await?;
    Ok(id)
}

/// Customer submission: one new pending order with all its items.
///
/// The whole write is a single transaction, so a failed item insert
/// rolls the order back instead of leaving an orphaned empty order.
pub async fn submit(
    pool: &SqlitePool,
    table_id: i64,
    items: &[OrderItemDraft],
) -> RepoResult<OrderDetail> {
    if items.is_empty() {
        return Err(RepoError::Domain(ErrorCode::OrderEmpty));
    }
    if super::dining_table::find_by_id(pool, table_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Domain(ErrorCode::TableNotFound));
    }

    let mut tx = pool.begin().await?;

    let mut total: i64 = 0;
    let mut priced = Vec::with_capacity(items.len());
    for draft in items {
        let price = price_line(&mut tx, draft).await?;
        total += price * draft.quantity;
        priced.push((draft, price));
    }

    let order_id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO orders (id, table_id, status, total_amount, created_at, updated_at) \
         VALUES (?, ?, 'pending', ?, ?, ?)",
    )
    .bind(order_id)
    .bind(table_id)
    .bind(total)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (draft, price) in priced {
        insert_item(&mut tx, order_id, draft, price).await?;
    }

    tx.commit().await?;

    find_detail(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read back created order".into()))
}

/// Outcome of [`append_to_active`]
#[derive(Debug)]
pub struct AppendOutcome {
    pub detail: OrderDetail,
    /// Whether a new order row had to be created
    pub created: bool,
    /// Ids of the item rows this call inserted
    pub new_item_ids: Vec<i64>,
}

/// Admin table-detail flow: extend the table's active order, creating a
/// fresh pending order when the table has none.
pub async fn append_to_active(
    pool: &SqlitePool,
    table_id: i64,
    items: &[OrderItemDraft],
) -> RepoResult<AppendOutcome> {
    if items.is_empty() {
        return Err(RepoError::Domain(ErrorCode::OrderEmpty));
    }
    if super::dining_table::find_by_id(pool, table_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Domain(ErrorCode::TableNotFound));
    }

    let mut tx = pool.begin().await?;

    // Latest active order for the table, if any
    let existing: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM orders \
         WHERE table_id = ? AND status IN ('pending', 'preparing', 'served') \
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(table_id)
    .fetch_optional(&mut *tx)
    .await?;

    let now = now_millis();
    let (order_id, created) = match existing {
        Some((id,)) => (id, false),
        None => {
            let id = snowflake_id();
            sqlx::query(
                "INSERT INTO orders (id, table_id, status, total_amount, created_at, updated_at) \
                 VALUES (?, ?, 'pending', 0, ?, ?)",
            )
            .bind(id)
            .bind(table_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            (id, true)
        }
    };

    let mut added: i64 = 0;
    let mut new_item_ids = Vec::with_capacity(items.len());
    for draft in items {
        let price = price_line(&mut tx, draft).await?;
        added += price * draft.quantity;
        new_item_ids.push(insert_item(&mut tx, order_id, draft, price).await?);
    }

    sqlx::query("UPDATE orders SET total_amount = total_amount + ?, updated_at = ? WHERE id = ?")
        .bind(added)
        .bind(now)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let detail = find_detail(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read back order".into()))?;
    Ok(AppendOutcome {
        detail,
        created,
        new_item_ids,
    })
}

/// Admin status transition (any valid target status)
pub async fn set_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(ErrorCode::OrderNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or(RepoError::Domain(ErrorCode::OrderNotFound))
}

/// Customer cancellation: succeeds only while the order is still pending
pub async fn cancel_if_pending(pool: &SqlitePool, id: i64) -> RepoResult<Order> {
    let rows = sqlx::query(
        "UPDATE orders SET status = 'cancelled', updated_at = ? \
         WHERE id = ? AND status = 'pending'",
    )
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        // Distinguish "not found" from "no longer pending"
        return match find_by_id(pool, id).await? {
            None => Err(RepoError::Domain(ErrorCode::OrderNotFound)),
            Some(_) => Err(RepoError::Domain(ErrorCode::OrderNotCancellable)),
        };
    }
    find_by_id(pool, id)
        .await?
        .ok_or(RepoError::Domain(ErrorCode::OrderNotFound))
}

/// Per-order stats over all active orders (admin table map)
pub async fn find_active_stats(pool: &SqlitePool) -> RepoResult<Vec<ActiveOrderStat>> {
    let stats = sqlx::query_as::<_, ActiveOrderStat>(
        "SELECT o.id AS order_id, o.table_id, o.status, o.total_amount, o.created_at, \
                COALESCE(SUM(i.quantity), 0) AS item_count \
         FROM orders o LEFT JOIN order_item i ON i.order_id = o.id \
         WHERE o.status IN ('pending', 'preparing', 'served') \
         GROUP BY o.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{AreaCreate, CategoryCreate, DiningTableCreate, ProductCreate, ProductUpdate};

    struct Fixture {
        table_id: i64,
        espresso: i64,
        latte: i64,
    }

    async fn seed(pool: &SqlitePool) -> Fixture {
        use crate::db::repository::{area, category, dining_table, product};

        let area_id = area::create(pool, AreaCreate { name: "Hall".into() })
            .await
            .unwrap()
            .id;
        let table_id = dining_table::create(
            pool,
            DiningTableCreate {
                name: "T1".into(),
                area_id,
            },
        )
        .await
        .unwrap()
        .id;
        let cat = category::create(pool, CategoryCreate { name: "Coffee".into() })
            .await
            .unwrap()
            .id;

        let make = |name: &str, price: i64| ProductCreate {
            category_id: cat,
            name: name.into(),
            price,
            base_cost: None,
            image_url: None,
            is_active: None,
        };
        let espresso = product::create(pool, make("Espresso", 25_000)).await.unwrap().id;
        let latte = product::create(pool, make("Latte", 40_000)).await.unwrap().id;

        Fixture {
            table_id,
            espresso,
            latte,
        }
    }

    fn draft(product_id: i64, quantity: i64) -> OrderItemDraft {
        OrderItemDraft {
            product_id,
            quantity,
            note: None,
        }
    }

    #[tokio::test]
    async fn submit_prices_from_the_menu() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        // 2×Espresso (25,000) + 1×Latte (40,000) = 90,000
        let detail = submit(
            &db.pool,
            fx.table_id,
            &[draft(fx.espresso, 2), draft(fx.latte, 1)],
        )
        .await
        .unwrap();

        assert_eq!(detail.status, OrderStatus::Pending);
        assert_eq!(detail.total_amount, 90_000);
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.table_name, "T1");
        assert_eq!(detail.area_name, "Hall");
    }

    #[tokio::test]
    async fn price_at_order_is_frozen() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        let detail = submit(&db.pool, fx.table_id, &[draft(fx.espresso, 1)])
            .await
            .unwrap();

        // Menu price change after submission must not touch the order
        crate::db::repository::product::update(
            &db.pool,
            fx.espresso,
            ProductUpdate {
                category_id: None,
                name: None,
                price: Some(99_000),
                base_cost: None,
                image_url: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

        let after = find_detail(&db.pool, detail.id).await.unwrap().unwrap();
        assert_eq!(after.items[0].price_at_order, 25_000);
        assert_eq!(after.total_amount, 25_000);
    }

    #[tokio::test]
    async fn submit_rejects_empty_inactive_and_unknown() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        let err = submit(&db.pool, fx.table_id, &[]).await.unwrap_err();
        assert!(matches!(err, RepoError::Domain(ErrorCode::OrderEmpty)));

        let err = submit(&db.pool, fx.table_id, &[draft(424242, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Domain(ErrorCode::ProductNotFound)));

        crate::db::repository::product::deactivate(&db.pool, fx.latte)
            .await
            .unwrap();
        let err = submit(&db.pool, fx.table_id, &[draft(fx.latte, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Domain(ErrorCode::ProductInactive)));

        let err = submit(&db.pool, fx.table_id, &[draft(fx.espresso, 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn failed_item_leaves_no_orphaned_order() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        // Second line fails after the first priced fine
        let err = submit(
            &db.pool,
            fx.table_id,
            &[draft(fx.espresso, 1), draft(424242, 1)],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Domain(ErrorCode::ProductNotFound)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn cancel_only_while_pending() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        let detail = submit(&db.pool, fx.table_id, &[draft(fx.espresso, 1)])
            .await
            .unwrap();

        // pending → cancellable
        let cancelled = cancel_if_pending(&db.pool, detail.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        // already cancelled → not cancellable
        let err = cancel_if_pending(&db.pool, detail.id).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Domain(ErrorCode::OrderNotCancellable)
        ));

        // preparing → not cancellable
        let detail = submit(&db.pool, fx.table_id, &[draft(fx.espresso, 1)])
            .await
            .unwrap();
        set_status(&db.pool, detail.id, OrderStatus::Preparing)
            .await
            .unwrap();
        let err = cancel_if_pending(&db.pool, detail.id).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Domain(ErrorCode::OrderNotCancellable)
        ));

        // unknown id → not found
        let err = cancel_if_pending(&db.pool, 777).await.unwrap_err();
        assert!(matches!(err, RepoError::Domain(ErrorCode::OrderNotFound)));
    }

    #[tokio::test]
    async fn recent_by_table_excludes_terminal_orders() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        let open = submit(&db.pool, fx.table_id, &[draft(fx.espresso, 1)])
            .await
            .unwrap();
        let paid = submit(&db.pool, fx.table_id, &[draft(fx.latte, 1)])
            .await
            .unwrap();
        set_status(&db.pool, paid.id, OrderStatus::Paid).await.unwrap();

        let recent = find_recent_by_table(&db.pool, fx.table_id, 0).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, open.id);
        assert_eq!(recent[0].items[0].product_name, "Espresso");
    }

    #[tokio::test]
    async fn append_creates_then_extends() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        let first = append_to_active(&db.pool, fx.table_id, &[draft(fx.espresso, 1)])
            .await
            .unwrap();
        assert!(first.created);
        assert_eq!(first.new_item_ids.len(), 1);
        assert_eq!(first.detail.total_amount, 25_000);

        let second = append_to_active(&db.pool, fx.table_id, &[draft(fx.latte, 2)])
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.detail.id, first.detail.id);
        assert_eq!(second.detail.total_amount, 25_000 + 80_000);
        assert_eq!(second.detail.items.len(), 2);
    }

    #[tokio::test]
    async fn active_stats_cover_only_open_orders() {
        let db = DbService::in_memory().await.unwrap();
        let fx = seed(&db.pool).await;

        let open = submit(&db.pool, fx.table_id, &[draft(fx.espresso, 3)])
            .await
            .unwrap();
        let done = submit(&db.pool, fx.table_id, &[draft(fx.latte, 1)])
            .await
            .unwrap();
        set_status(&db.pool, done.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let stats = find_active_stats(&db.pool).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].order_id, open.id);
        assert_eq!(stats[0].item_count, 3);
        assert_eq!(stats[0].total_amount, 75_000);
    }
}
