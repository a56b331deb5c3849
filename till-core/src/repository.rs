use async_trait::async_trait;

use crate::error::RepositoryError;
use till_shared::models::catalog::{Customer, CustomerSpec, Item, ItemSpec};
use till_shared::models::order::{OrderDraft, OrderView};

/// Repository trait for order aggregate access.
///
/// Each method runs in its own transaction scope; create and replace are
/// all-or-nothing across the header and every line. The returned view is
/// re-read from committed state.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Resolve the customer and items, then write the header and one line
    /// per item description, in input order.
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderView, RepositoryError>;

    async fn get_order(&self, id: i64) -> Result<OrderView, RepositoryError>;

    /// Full-replace semantics: new customer association, new notes, and the
    /// complete new line set. The creation timestamp is never modified.
    async fn replace_order(&self, id: i64, draft: &OrderDraft)
        -> Result<OrderView, RepositoryError>;

    /// Delete the order's lines and header together.
    async fn delete_order(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Repository trait for single-row item access
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create_item(&self, spec: &ItemSpec) -> Result<Item, RepositoryError>;

    async fn get_item(&self, id: i64) -> Result<Item, RepositoryError>;

    async fn update_item(&self, id: i64, spec: &ItemSpec) -> Result<Item, RepositoryError>;

    async fn delete_item(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Repository trait for single-row customer access
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create_customer(&self, spec: &CustomerSpec) -> Result<Customer, RepositoryError>;

    async fn get_customer(&self, id: i64) -> Result<Customer, RepositoryError>;

    async fn update_customer(&self, id: i64, spec: &CustomerSpec)
        -> Result<Customer, RepositoryError>;

    async fn delete_customer(&self, id: i64) -> Result<(), RepositoryError>;
}
