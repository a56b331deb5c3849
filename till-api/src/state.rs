use std::sync::Arc;
use till_core::repository::{CustomerRepository, ItemRepository, OrderRepository};

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub customers: Arc<dyn CustomerRepository>,
}
