//! Repository for per-alert-type policies

use crate::error::DbError;

pub use slotify_common::models::AlertConfig;

/// Repository for alert configs, keyed by alert type.
pub trait AlertConfigRepository {
    /// Create the `alert_configs` table if it doesn't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert or replace the policy for `config.alert_type`, keeping `created_at`.
    fn upsert_config(
        &self,
        config: AlertConfig,
    ) -> impl std::future::Future<Output = Result<AlertConfig, DbError>> + Send;

    /// The active config for an alert type, if any.
    fn find_active(
        &self,
        alert_type: &str,
    ) -> impl std::future::Future<Output = Result<Option<AlertConfig>, DbError>> + Send;

    /// All configs, active or not, ordered by alert type.
    fn find_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<AlertConfig>, DbError>> + Send;
}
