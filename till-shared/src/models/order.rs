use serde::{Deserialize, Serialize};

use super::catalog::{CustomerSpec, ItemSpec};

/// Input for creating or fully replacing an order. The item list is ordered,
/// may be empty, and may repeat a description (one line per occurrence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer: CustomerSpec,
    pub notes: Option<String>,
    pub items: Vec<ItemSpec>,
}

/// The nested read model of one order: header fields, the customer it
/// references, and its item lines in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderView {
    pub id: i64,
    pub timestamp: i64,
    pub name: String,
    pub phone: String,
    pub notes: Option<String>,
    pub items: Vec<ItemSpec>,
}
