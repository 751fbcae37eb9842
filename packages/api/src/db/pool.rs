//! Database connection pool using the OnceCell pattern.

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::settings;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let database = &settings::get().database;
        tracing::info!(
            max_connections = database.max_connections,
            "Connecting to database"
        );

        PgPoolOptions::new()
            .max_connections(database.max_connections)
            .connect(&database.url)
            .await
    })
    .await
}

/// Run the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
