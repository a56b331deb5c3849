use std::net::SocketAddr;
use std::sync::Arc;

use till_api::{app, AppState};
use till_store::{DbClient, SqliteCustomerRepository, SqliteItemRepository, SqliteOrderRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "till_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = till_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Till API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState {
        orders: Arc::new(SqliteOrderRepository::new(db.pool.clone())),
        items: Arc::new(SqliteItemRepository::new(db.pool.clone())),
        customers: Arc::new(SqliteCustomerRepository::new(db.pool.clone())),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
