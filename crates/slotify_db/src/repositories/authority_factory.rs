//! Factory for creating authority repositories

use crate::repositories::authority_sql::SqlAuthorityRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating authority repositories
#[derive(Debug, Clone)]
pub struct AuthorityRepositoryFactory;

impl AuthorityRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AuthorityRepositoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryFactory<SqlAuthorityRepository, DbClient> for AuthorityRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlAuthorityRepository {
        SqlAuthorityRepository::new(db_client)
    }
}
