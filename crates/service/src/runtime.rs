//! Bootstrap helpers for an enclosing service.
//!
//! Turns a validated `AppConfig` into a ready `CredentialService` backed by
//! the sea-orm directory, and installs the configured tracing subscriber.

use std::sync::Arc;

use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat, LoggingConfig};
use tracing::info;

use crate::auth::{repo::seaorm::SeaOrmUserDirectory, CredentialService, KdfParams};

/// Install the tracing subscriber selected by `logging.format`.
pub fn init_logging(cfg: &LoggingConfig) {
    match cfg.format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

/// Connect the pool, apply migrations and build the credential service.
pub async fn credential_service(cfg: &AppConfig) -> anyhow::Result<CredentialService<SeaOrmUserDirectory>> {
    cfg.database.validate()?;
    cfg.auth.validate()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::migrate(&db).await?;

    let kdf = KdfParams::from(&cfg.auth);
    info!(
        event = "credential_service_ready",
        memory_kib = kdf.memory_kib,
        iterations = kdf.iterations,
        "credential service initialized"
    );
    Ok(CredentialService::new(Arc::new(SeaOrmUserDirectory { db }), kdf))
}
