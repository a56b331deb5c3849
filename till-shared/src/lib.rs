pub mod models;

pub use models::catalog::{Customer, CustomerSpec, Item, ItemSpec};
pub use models::order::{OrderDraft, OrderView};
