use serde::{Deserialize, Serialize};

/// A stored customer row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// A stored catalog item row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Candidate customer identity; dedup key is the (name, phone) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSpec {
    pub name: String,
    pub phone: String,
}

/// Candidate catalog item; dedup key is (name, price), price compared exactly.
/// The same name at a different price names a distinct catalog row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSpec {
    pub name: String,
    pub price: f64,
}
