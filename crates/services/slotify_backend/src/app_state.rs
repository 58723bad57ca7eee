// --- File: crates/services/slotify_backend/src/app_state.rs ---
use slotify_chainsync::ChainsyncState;
use slotify_common::services::ServiceFactory;
use slotify_config::AppConfig;
use slotify_db::{DbClient, DbClientFactory, DbError};
use std::sync::Arc;
use tracing::{info, warn};

use crate::service_factory::SlotifyServiceFactory;

/// Backs the health check when no `[database]` section is configured.
const FALLBACK_DATABASE_URL: &str = "sqlite::memory:";

/// Application state that is shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
    pub chainsync: Arc<ChainsyncState>,
}

impl AppState {
    /// Connect the database, build the providers and create the tables.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, DbError> {
        let service_factory = Arc::new(SlotifyServiceFactory::new(config.clone()));
        Self::with_service_factory(config, service_factory).await
    }

    pub async fn with_service_factory(
        config: Arc<AppConfig>,
        service_factory: Arc<dyn ServiceFactory>,
    ) -> Result<Self, DbError> {
        let db_client = connect(&config).await?;

        let chainsync = ChainsyncState::new(
            config.clone(),
            db_client,
            service_factory.calendar_service(),
        );
        chainsync.init_schema().await?;
        info!(
            "ChainSync state ready (enabled: {})",
            chainsync.is_enabled()
        );

        Ok(Self {
            config,
            service_factory,
            chainsync: Arc::new(chainsync),
        })
    }
}

// Without a database ChainSync stays mounted but answers 503.
async fn connect(config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
    let factory = DbClientFactory::new();
    if config.database.is_some() {
        factory.from_app_config(config).await
    } else {
        warn!("No [database] section configured; ChainSync is disabled");
        factory.from_url(FALLBACK_DATABASE_URL).await
    }
}
