use std::path::PathBuf;

use till_store::DbClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bulk-load the seed description files (customers.json, items.json,
/// example_orders.json) from the directory given as the first argument,
/// default `seed/`. Safe to run against a live database: loading goes
/// through the same find-or-create resolution as the API.
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "till_store=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("seed"));

    let config = till_store::app_config::Config::load().expect("Failed to load config");
    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");

    let summary = till_store::seed::load_seed_dir(&db.pool, &dir)
        .await
        .expect("Failed to load seed data");

    tracing::info!(
        customers = summary.customers,
        items = summary.items,
        orders = summary.orders,
        "seed finished"
    );
}
