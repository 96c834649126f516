//! Application context - dependency injection container

use std::sync::Arc;

use linkpage_core::{ProfileGateway, UploadPipeline};
use linkpage_domain::{Config, Result};
use linkpage_infra::{
    blob_storage_from_config, DbManager, SqliteImageRepository, SqliteLinkRepository,
    SqliteProfileRepository, SquareCropTransform,
};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub gateway: Arc<ProfileGateway>,
    pub uploads: Arc<UploadPipeline>,
}

impl AppContext {
    /// Create a context from the environment / discovered config files
    pub fn new() -> Result<Self> {
        Self::new_with_config(linkpage_infra::config::load()?)
    }

    /// Create a context with an explicit configuration
    ///
    /// Opens the database pool, applies the schema and wires the SQLite
    /// repositories, blob storage and avatar crop into the gateway and
    /// upload pipeline.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::from_config(&config.database)?);
        db.run_migrations()?;

        let gateway = Arc::new(ProfileGateway::new(
            Arc::new(SqliteProfileRepository::new(Arc::clone(&db))),
            Arc::new(SqliteLinkRepository::new(Arc::clone(&db))),
            Arc::new(SqliteImageRepository::new(Arc::clone(&db))),
        ));

        let storage = blob_storage_from_config(&config.storage)?;
        let uploads = Arc::new(UploadPipeline::new(
            storage,
            Arc::new(SquareCropTransform::default()),
            Arc::clone(&gateway),
            config.storage.max_upload_bytes,
        ));

        info!(
            db_path = %db.path().display(),
            storage_backend = ?config.storage.backend,
            "application context initialised"
        );

        Ok(Self { config, db, gateway, uploads })
    }

    /// Aggregate health of the database pool and blob storage
    pub async fn health_check(&self) -> HealthStatus {
        let storage = ComponentHealth::healthy("storage")
            .with_message(format!("{:?} backend", self.config.storage.backend).to_lowercase());

        HealthStatus::new().add_component(self.check_database_health().await).add_component(storage)
    }

    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(health)) if health.healthy => ComponentHealth::healthy("database").with_message(
                format!("{}/{} connections idle", health.idle_connections, health.max_connections),
            ),
            Ok(Ok(health)) => ComponentHealth::unhealthy(
                "database",
                health.message.unwrap_or_else(|| "pool reported unhealthy".to_string()),
            ),
            Ok(Err(e)) => {
                warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }
}
