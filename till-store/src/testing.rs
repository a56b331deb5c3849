use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Fresh in-memory database with the schema applied. One connection only:
/// every pooled connection would otherwise open its own empty memory store.
pub(crate) async fn memory_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("apply migrations");

    pool
}
