//! SQL implementation of the alert config repository

use crate::error::DbError;
use crate::repositories::alert_config::{AlertConfig, AlertConfigRepository};
use crate::repositories::codec::{
    encode_bool, encode_json, encode_time, get_bool, get_json, get_opt_string, get_string,
    get_time,
};
use crate::DbClient;
use sqlx::any::AnyRow;
use tracing::{debug, error, info};

const ALERT_CONFIG_COLUMNS: &str =
    "alert_type, description, policy, is_active, created_at, updated_at";

/// SQL implementation of the alert config repository
#[derive(Debug, Clone)]
pub struct SqlAlertConfigRepository {
    db_client: DbClient,
}

impl SqlAlertConfigRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn alert_config_from_row(row: &AnyRow) -> Result<AlertConfig, DbError> {
    Ok(AlertConfig {
        alert_type: get_string(row, "alert_type")?,
        description: get_opt_string(row, "description")?,
        policy: get_json(row, "policy")?,
        is_active: get_bool(row, "is_active")?,
        created_at: get_time(row, "created_at")?,
        updated_at: get_time(row, "updated_at")?,
    })
}

impl AlertConfigRepository for SqlAlertConfigRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing alert config schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS alert_configs (
                alert_type TEXT PRIMARY KEY,
                description TEXT,
                policy TEXT NOT NULL,
                is_active BIGINT NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;

        info!("Alert config schema initialized successfully");
        Ok(())
    }

    async fn upsert_config(&self, config: AlertConfig) -> Result<AlertConfig, DbError> {
        debug!("Upserting alert config: {}", config.alert_type);

        let query = r#"
            INSERT INTO alert_configs (alert_type, description, policy, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (alert_type) DO UPDATE SET
                description = excluded.description,
                policy = excluded.policy,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at
        "#;

        sqlx::query(query)
            .bind(&config.alert_type)
            .bind(config.description.clone())
            .bind(encode_json("policy", &config.policy)?)
            .bind(encode_bool(config.is_active))
            .bind(encode_time(&config.created_at))
            .bind(encode_time(&config.updated_at))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert alert config {}: {}", config.alert_type, e);
                DbError::from_query(e)
            })?;

        let query = format!(
            "SELECT {} FROM alert_configs WHERE alert_type = $1",
            ALERT_CONFIG_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(&config.alert_type)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(DbError::from_query)?;

        info!("Alert config {} stored", config.alert_type);
        alert_config_from_row(&row)
    }

    async fn find_active(&self, alert_type: &str) -> Result<Option<AlertConfig>, DbError> {
        debug!("Finding active alert config: {}", alert_type);

        let query = format!(
            "SELECT {} FROM alert_configs WHERE alert_type = $1 AND is_active = 1",
            ALERT_CONFIG_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(alert_type)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find alert config: {}", e);
                DbError::from_query(e)
            })?;

        row.as_ref().map(alert_config_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<AlertConfig>, DbError> {
        let query = format!(
            "SELECT {} FROM alert_configs ORDER BY alert_type ASC",
            ALERT_CONFIG_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list alert configs: {}", e);
                DbError::from_query(e)
            })?;

        rows.iter().map(alert_config_from_row).collect()
    }
}
