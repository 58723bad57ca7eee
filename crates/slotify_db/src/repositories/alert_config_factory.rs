//! Factory for creating alert config repositories

use crate::repositories::alert_config_sql::SqlAlertConfigRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating alert config repositories
#[derive(Debug, Clone)]
pub struct AlertConfigRepositoryFactory;

impl AlertConfigRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AlertConfigRepositoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryFactory<SqlAlertConfigRepository, DbClient> for AlertConfigRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlAlertConfigRepository {
        SqlAlertConfigRepository::new(db_client)
    }
}
