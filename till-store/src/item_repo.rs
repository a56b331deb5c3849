use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::resolver::resolve_item;
use till_core::error::RepositoryError;
use till_core::repository::ItemRepository;
use till_shared::models::catalog::{Item, ItemSpec};

pub struct SqliteItemRepository {
    pool: Pool<Sqlite>,
}

impl SqliteItemRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    price: f64,
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    /// Direct creation goes through the same find-or-create resolution as the
    /// order path, so a repeated (name, price) returns the existing row
    /// instead of tripping the unique index.
    async fn create_item(&self, spec: &ItemSpec) -> Result<Item, RepositoryError> {
        let mut conn = self.pool.acquire().await.context("acquire connection")?;

        let id = resolve_item(&mut conn, &spec.name, spec.price)
            .await
            .context("resolve item")?;

        Ok(Item { id, name: spec.name.clone(), price: spec.price })
    }

    async fn get_item(&self, id: i64) -> Result<Item, RepositoryError> {
        let row: Option<ItemRow> = sqlx::query_as("SELECT id, name, price FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("read item")?;

        row.map(|row| Item { id: row.id, name: row.name, price: row.price })
            .ok_or_else(|| RepositoryError::not_found("item", id))
    }

    async fn update_item(&self, id: i64, spec: &ItemSpec) -> Result<Item, RepositoryError> {
        let done = sqlx::query("UPDATE items SET name = ?1, price = ?2 WHERE id = ?3")
            .bind(&spec.name)
            .bind(spec.price)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("update item")?;
        if done.rows_affected() == 0 {
            return Err(RepositoryError::not_found("item", id));
        }

        Ok(Item { id, name: spec.name.clone(), price: spec.price })
    }

    async fn delete_item(&self, id: i64) -> Result<(), RepositoryError> {
        let done = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete item")?;
        if done.rows_affected() == 0 {
            return Err(RepositoryError::not_found("item", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_repo::SqliteOrderRepository;
    use crate::testing::memory_pool;
    use till_core::repository::OrderRepository;
    use till_shared::models::catalog::CustomerSpec;
    use till_shared::models::order::OrderDraft;

    #[tokio::test]
    async fn test_item_crud_round_trip() {
        let pool = memory_pool().await;
        let repo = SqliteItemRepository::new(pool);

        let created = repo
            .create_item(&ItemSpec { name: "Widget".into(), price: 9.99 })
            .await
            .unwrap();
        assert_eq!(repo.get_item(created.id).await.unwrap(), created);

        let updated = repo
            .update_item(created.id, &ItemSpec { name: "Widget XL".into(), price: 12.99 })
            .await
            .unwrap();
        assert_eq!(updated.name, "Widget XL");
        assert_eq!(repo.get_item(created.id).await.unwrap(), updated);

        repo.delete_item(created.id).await.unwrap();
        assert!(repo.get_item(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_item_deduplicates_exact_match() {
        let pool = memory_pool().await;
        let repo = SqliteItemRepository::new(pool);

        let first = repo
            .create_item(&ItemSpec { name: "Widget".into(), price: 9.99 })
            .await
            .unwrap();
        let again = repo
            .create_item(&ItemSpec { name: "Widget".into(), price: 9.99 })
            .await
            .unwrap();
        let repriced = repo
            .create_item(&ItemSpec { name: "Widget".into(), price: 10.99 })
            .await
            .unwrap();

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, repriced.id);
    }

    #[tokio::test]
    async fn test_missing_item_is_not_found() {
        let pool = memory_pool().await;
        let repo = SqliteItemRepository::new(pool);

        assert!(repo.get_item(42).await.unwrap_err().is_not_found());
        assert!(repo
            .update_item(42, &ItemSpec { name: "Widget".into(), price: 9.99 })
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete_item(42).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_item_referenced_by_order_is_rejected() {
        let pool = memory_pool().await;
        let items = SqliteItemRepository::new(pool.clone());
        let orders = SqliteOrderRepository::new(pool);

        let view = orders
            .create_order(&OrderDraft {
                customer: CustomerSpec { name: "Alice".into(), phone: "5551234567".into() },
                notes: None,
                items: vec![ItemSpec { name: "Widget".into(), price: 9.99 }],
            })
            .await
            .unwrap();
        let item = items.create_item(&ItemSpec { name: "Widget".into(), price: 9.99 }).await.unwrap();

        // The junction row still references it; the foreign key holds
        let err = items.delete_item(item.id).await.unwrap_err();
        assert!(!err.is_not_found(), "expected a storage failure, got {err:?}");

        assert_eq!(orders.get_order(view.id).await.unwrap().items.len(), 1);
    }
}
