use sqlx::SqliteConnection;

/// Find-or-create a customer row keyed on exact (name, phone).
///
/// A single atomic upsert: the unique index makes a concurrent duplicate
/// insert impossible, and the no-op `DO UPDATE` lets `RETURNING` yield the
/// existing row's id on conflict. Inserts exactly zero or one row.
///
/// Takes an explicit connection so it runs the same way inside an open
/// transaction (order aggregation, seed loading) or standalone.
pub async fn resolve_customer(
    conn: &mut SqliteConnection,
    name: &str,
    phone: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO customers (name, phone) VALUES (?1, ?2)
        ON CONFLICT (name, phone) DO UPDATE SET name = excluded.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(phone)
    .fetch_one(conn)
    .await
}

/// Find-or-create an item row keyed on (name, price), price compared for
/// exact equality. Same contract as [`resolve_customer`].
pub async fn resolve_item(
    conn: &mut SqliteConnection,
    name: &str,
    price: f64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO items (name, price) VALUES (?1, ?2)
        ON CONFLICT (name, price) DO UPDATE SET name = excluded.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(price)
    .fetch_one(conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_pool;

    #[tokio::test]
    async fn test_resolve_customer_idempotent() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = resolve_customer(&mut conn, "Alice", "5551234567").await.unwrap();
        let second = resolve_customer(&mut conn, "Alice", "5551234567").await.unwrap();
        assert_eq!(first, second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_resolve_customer_distinguishes_phone() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let home = resolve_customer(&mut conn, "Alice", "5551234567").await.unwrap();
        let work = resolve_customer(&mut conn, "Alice", "5559999999").await.unwrap();
        assert_ne!(home, work);
    }

    #[tokio::test]
    async fn test_resolve_item_price_is_exact() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let a = resolve_item(&mut conn, "Widget", 9.99).await.unwrap();
        let b = resolve_item(&mut conn, "Widget", 9.99).await.unwrap();
        let cheaper = resolve_item(&mut conn, "Widget", 9.98).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, cheaper);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_resolve_returns_preexisting_row() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let existing: i64 =
            sqlx::query_scalar("INSERT INTO items (name, price) VALUES ('Gadget', 4.5) RETURNING id")
                .fetch_one(&mut *conn)
                .await
                .unwrap();

        let resolved = resolve_item(&mut conn, "Gadget", 4.5).await.unwrap();
        assert_eq!(resolved, existing);
    }
}
