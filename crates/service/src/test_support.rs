#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

use crate::auth::KdfParams;

/// Cheap argon2 settings so unit tests do not spend seconds per hash.
pub fn fast_kdf() -> KdfParams {
    KdfParams { salt_len: 8, hash_len: 32, memory_kib: 64, iterations: 1, parallelism: 1 }
}

pub fn memory_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 5,
        idle_timeout_secs: 600,
        max_lifetime_secs: 3600,
        sqlx_logging: false,
    }
}

/// Fresh in-memory sqlite database with migrations applied.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_with_config(&memory_db_config()).await?;
    models::db::migrate(&db).await?;
    Ok(db)
}
