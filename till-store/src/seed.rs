use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::order_repo::insert_order;
use crate::resolver::{resolve_customer, resolve_item};
use till_shared::models::catalog::{CustomerSpec, ItemSpec};
use till_shared::models::order::OrderDraft;

/// `customers.json` maps phone -> name; `items.json` maps name -> details.
#[derive(Debug, Deserialize)]
struct SeedItem {
    price: f64,
}

/// One entry of `example_orders.json`. The timestamp comes from the file,
/// not the clock.
#[derive(Debug, Deserialize)]
pub struct SeedOrder {
    pub name: String,
    pub phone: String,
    pub timestamp: i64,
    pub notes: Option<String>,
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub customers: usize,
    pub items: usize,
    pub orders: usize,
}

/// Load the three seed description files through the same find-or-create
/// resolution as the live path, so seeded rows never duplicate customer or
/// item rows created through the API. Each order loads in its own
/// transaction; a failure rolls that order back whole.
pub async fn load_seed_dir(pool: &Pool<Sqlite>, dir: &Path) -> Result<SeedSummary> {
    let customers: HashMap<String, String> = read_json(&dir.join("customers.json"))?;
    let items: HashMap<String, SeedItem> = read_json(&dir.join("items.json"))?;
    let orders: Vec<SeedOrder> = read_json(&dir.join("example_orders.json"))?;

    let summary = SeedSummary {
        customers: customers.len(),
        items: items.len(),
        orders: orders.len(),
    };

    let mut conn = pool.acquire().await.context("acquire seed connection")?;
    for (phone, name) in &customers {
        resolve_customer(&mut conn, name, phone)
            .await
            .with_context(|| format!("seed customer {name}"))?;
    }
    for (name, item) in &items {
        resolve_item(&mut conn, name, item.price)
            .await
            .with_context(|| format!("seed item {name}"))?;
    }
    drop(conn);

    for order in orders {
        let timestamp = order.timestamp;
        let draft = OrderDraft {
            customer: CustomerSpec { name: order.name, phone: order.phone },
            notes: order.notes,
            items: order.items,
        };

        let mut tx = pool.begin().await.context("begin seed transaction")?;
        insert_order(&mut tx, &draft, timestamp)
            .await
            .with_context(|| format!("seed order for {}", draft.customer.name))?;
        tx.commit().await.context("commit seed transaction")?;
    }

    info!(
        customers = summary.customers,
        items = summary.items,
        orders = summary.orders,
        "seed load complete"
    );
    Ok(summary)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}
