//! Factory for creating alert meeting repositories

use crate::repositories::alert_meeting_sql::SqlAlertMeetingRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating alert meeting repositories
#[derive(Debug, Clone)]
pub struct AlertMeetingRepositoryFactory;

impl AlertMeetingRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AlertMeetingRepositoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryFactory<SqlAlertMeetingRepository, DbClient> for AlertMeetingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlAlertMeetingRepository {
        SqlAlertMeetingRepository::new(db_client)
    }
}
