
/// `users` entity helpers
pub mod user_tests;

use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Fresh in-memory sqlite database with the schema applied.
///
/// A single pooled connection keeps every query on the same memory database.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 5,
        idle_timeout_secs: 600,
        max_lifetime_secs: 3600,
        sqlx_logging: false,
    };
    let db = crate::db::connect_with_config(&cfg).await?;
    crate::db::migrate(&db).await?;
    Ok(db)
}
