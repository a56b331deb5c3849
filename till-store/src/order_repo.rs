use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::resolver::{resolve_customer, resolve_item};
use till_core::error::RepositoryError;
use till_core::repository::OrderRepository;
use till_shared::models::catalog::ItemSpec;
use till_shared::models::order::{OrderDraft, OrderView};

pub struct SqliteOrderRepository {
    pool: Pool<Sqlite>,
}

impl SqliteOrderRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderHeaderRow {
    id: i64,
    timestamp: i64,
    name: String,
    phone: String,
    notes: Option<String>,
}

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    name: String,
    price: f64,
}

/// Reconstruct the nested view of one order: header joined with customer
/// fields, plus its lines joined with item fields in insertion order.
///
/// Read-only. Takes an explicit connection so the aggregator and updater can
/// call it from inside their open transaction as well as standalone.
pub(crate) async fn fetch_order(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<OrderView>, sqlx::Error> {
    let header: Option<OrderHeaderRow> = sqlx::query_as(
        r#"
        SELECT orders.id, orders.timestamp, customers.name, customers.phone, orders.notes
        FROM orders
        JOIN customers ON orders.customer_id = customers.id
        WHERE orders.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(header) = header else {
        return Ok(None);
    };

    let lines: Vec<OrderLineRow> = sqlx::query_as(
        r#"
        SELECT items.name, items.price
        FROM order_lines
        JOIN items ON order_lines.item_id = items.id
        WHERE order_lines.order_id = ?1
        ORDER BY order_lines.rowid
        "#,
    )
    .bind(id)
    .fetch_all(conn)
    .await?;

    Ok(Some(OrderView {
        id: header.id,
        timestamp: header.timestamp,
        name: header.name,
        phone: header.phone,
        notes: header.notes,
        items: lines
            .into_iter()
            .map(|line| ItemSpec { name: line.name, price: line.price })
            .collect(),
    }))
}

/// Write the header and one line per item description, in input order.
/// The caller owns the transaction scope; nothing here commits.
pub(crate) async fn insert_order(
    conn: &mut SqliteConnection,
    draft: &OrderDraft,
    timestamp: i64,
) -> Result<i64, sqlx::Error> {
    let customer_id = resolve_customer(&mut *conn, &draft.customer.name, &draft.customer.phone).await?;

    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (timestamp, customer_id, notes) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(timestamp)
    .bind(customer_id)
    .bind(draft.notes.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    insert_lines(conn, order_id, &draft.items).await?;
    Ok(order_id)
}

/// Repeated descriptions resolve to the same item id and each still gets its
/// own junction row; quantity is line repetition, not a count field.
async fn insert_lines(
    conn: &mut SqliteConnection,
    order_id: i64,
    items: &[ItemSpec],
) -> Result<(), sqlx::Error> {
    for item in items {
        let item_id = resolve_item(&mut *conn, &item.name, item.price).await?;
        sqlx::query("INSERT INTO order_lines (order_id, item_id) VALUES (?1, ?2)")
            .bind(order_id)
            .bind(item_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderView, RepositoryError> {
        let mut tx = self.pool.begin().await.context("begin create-order transaction")?;

        let order_id = insert_order(&mut tx, draft, Utc::now().timestamp())
            .await
            .context("write order header and lines")?;

        let view = fetch_order(&mut tx, order_id)
            .await
            .context("re-read created order")?
            .ok_or_else(|| anyhow::anyhow!("order {order_id} missing on re-read"))?;

        tx.commit().await.context("commit create-order transaction")?;

        tracing::debug!(order_id, lines = view.items.len(), "order created");
        Ok(view)
    }

    async fn get_order(&self, id: i64) -> Result<OrderView, RepositoryError> {
        let mut conn = self.pool.acquire().await.context("acquire connection")?;

        fetch_order(&mut conn, id)
            .await
            .context("read order")?
            .ok_or_else(|| RepositoryError::not_found("order", id))
    }

    async fn replace_order(&self, id: i64, draft: &OrderDraft) -> Result<OrderView, RepositoryError> {
        let mut tx = self.pool.begin().await.context("begin replace-order transaction")?;

        // Fail before making any other change
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM orders WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .context("check order exists")?;
        if exists.is_none() {
            return Err(RepositoryError::not_found("order", id));
        }

        let customer_id = resolve_customer(&mut tx, &draft.customer.name, &draft.customer.phone)
            .await
            .context("resolve replacement customer")?;

        // Creation timestamp is never modified
        sqlx::query("UPDATE orders SET customer_id = ?1, notes = ?2 WHERE id = ?3")
            .bind(customer_id)
            .bind(draft.notes.as_deref())
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("update order header")?;

        sqlx::query("DELETE FROM order_lines WHERE order_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("clear prior order lines")?;

        insert_lines(&mut tx, id, &draft.items)
            .await
            .context("insert replacement lines")?;

        let view = fetch_order(&mut tx, id)
            .await
            .context("re-read replaced order")?
            .ok_or_else(|| anyhow::anyhow!("order {id} missing on re-read"))?;

        tx.commit().await.context("commit replace-order transaction")?;

        tracing::debug!(order_id = id, lines = view.items.len(), "order replaced");
        Ok(view)
    }

    async fn delete_order(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.context("begin delete-order transaction")?;

        sqlx::query("DELETE FROM order_lines WHERE order_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete order lines")?;

        let done = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete order header")?;
        if done.rows_affected() == 0 {
            // Dropping the transaction rolls the line deletion back
            return Err(RepositoryError::not_found("order", id));
        }

        tx.commit().await.context("commit delete-order transaction")?;

        tracing::debug!(order_id = id, "order deleted");
        Ok(())
    }
}
