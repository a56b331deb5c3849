use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::resolver::resolve_customer;
use till_core::error::RepositoryError;
use till_core::repository::CustomerRepository;
use till_shared::models::catalog::{Customer, CustomerSpec};

pub struct SqliteCustomerRepository {
    pool: Pool<Sqlite>,
}

impl SqliteCustomerRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    phone: String,
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    /// Direct creation goes through the same find-or-create resolution as
    /// the order path, so a repeated (name, phone) returns the existing row
    /// instead of tripping the unique index.
    async fn create_customer(&self, spec: &CustomerSpec) -> Result<Customer, RepositoryError> {
        let mut conn = self.pool.acquire().await.context("acquire connection")?;

        let id = resolve_customer(&mut conn, &spec.name, &spec.phone)
            .await
            .context("resolve customer")?;

        Ok(Customer { id, name: spec.name.clone(), phone: spec.phone.clone() })
    }

    async fn get_customer(&self, id: i64) -> Result<Customer, RepositoryError> {
        let row: Option<CustomerRow> =
            sqlx::query_as("SELECT id, name, phone FROM customers WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("read customer")?;

        row.map(|row| Customer { id: row.id, name: row.name, phone: row.phone })
            .ok_or_else(|| RepositoryError::not_found("customer", id))
    }

    async fn update_customer(&self, id: i64, spec: &CustomerSpec) -> Result<Customer, RepositoryError> {
        let done = sqlx::query("UPDATE customers SET name = ?1, phone = ?2 WHERE id = ?3")
            .bind(&spec.name)
            .bind(&spec.phone)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("update customer")?;
        if done.rows_affected() == 0 {
            return Err(RepositoryError::not_found("customer", id));
        }

        Ok(Customer { id, name: spec.name.clone(), phone: spec.phone.clone() })
    }

    async fn delete_customer(&self, id: i64) -> Result<(), RepositoryError> {
        let done = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete customer")?;
        if done.rows_affected() == 0 {
            return Err(RepositoryError::not_found("customer", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_pool;

    #[tokio::test]
    async fn test_customer_crud_round_trip() {
        let pool = memory_pool().await;
        let repo = SqliteCustomerRepository::new(pool);

        let created = repo
            .create_customer(&CustomerSpec { name: "Alice".into(), phone: "5551234567".into() })
            .await
            .unwrap();
        assert_eq!(repo.get_customer(created.id).await.unwrap(), created);

        let updated = repo
            .update_customer(
                created.id,
                &CustomerSpec { name: "Alice Smith".into(), phone: "5551234567".into() },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice Smith");

        repo.delete_customer(created.id).await.unwrap();
        assert!(repo.get_customer(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_customer_deduplicates_exact_match() {
        let pool = memory_pool().await;
        let repo = SqliteCustomerRepository::new(pool);

        let first = repo
            .create_customer(&CustomerSpec { name: "Alice".into(), phone: "5551234567".into() })
            .await
            .unwrap();
        let again = repo
            .create_customer(&CustomerSpec { name: "Alice".into(), phone: "5551234567".into() })
            .await
            .unwrap();

        assert_eq!(first.id, again.id);
    }

    #[tokio::test]
    async fn test_missing_customer_is_not_found() {
        let pool = memory_pool().await;
        let repo = SqliteCustomerRepository::new(pool);

        assert!(repo.get_customer(7).await.unwrap_err().is_not_found());
        assert!(repo
            .update_customer(7, &CustomerSpec { name: "Bob".into(), phone: "5550000001".into() })
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete_customer(7).await.unwrap_err().is_not_found());
    }
}
