//! SQL implementation of the authority repository

use crate::error::DbError;
use crate::repositories::authority::{Authority, AuthorityFilter, AuthorityRepository};
use crate::repositories::codec::{
    encode_bool, encode_json, encode_time, get_bool, get_i64, get_json, get_opt_string,
    get_string, get_time, get_uuid, json_member_pattern,
};
use crate::DbClient;
use chrono::Utc;
use slotify_common::models::{GoogleCalendarLink, Jurisdiction};
use sqlx::any::AnyRow;
use tracing::{debug, error, info};

const AUTHORITY_COLUMNS: &str = "id, name, email, phone, role, department, region, sub_regions, \
     alert_types, priority, calendar_id, calendar_access_token, calendar_refresh_token, \
     calendar_connected, is_active, created_at, updated_at";

/// SQL implementation of the authority repository
#[derive(Debug, Clone)]
pub struct SqlAuthorityRepository {
    db_client: DbClient,
}

impl SqlAuthorityRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    async fn fetch_where(&self, conditions: &Conditions) -> Result<Vec<Authority>, DbError> {
        let query = format!(
            "SELECT {} FROM authorities {} ORDER BY priority ASC, name ASC",
            AUTHORITY_COLUMNS,
            conditions.where_clause()
        );
        debug!("Loading authorities: {}", query);

        let mut statement = sqlx::query(&query);
        for value in &conditions.binds {
            statement = statement.bind(value.as_str());
        }

        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to load authorities: {}", e);
                DbError::from_query(e)
            })?;

        rows.iter().map(authority_from_row).collect()
    }
}

/// WHERE clauses with positional `$N` binds, numbered in push order.
#[derive(Debug, Default)]
struct Conditions {
    clauses: Vec<String>,
    binds: Vec<String>,
}

impl Conditions {
    fn bind(&mut self, value: impl Into<String>) -> String {
        self.binds.push(value.into());
        format!("${}", self.binds.len())
    }

    fn push(&mut self, clause: String) {
        self.clauses.push(clause);
    }

    fn tagged_for(&mut self, alert_type: &str) -> String {
        let placeholder = self.bind(json_member_pattern(alert_type));
        format!("alert_types LIKE {} ESCAPE '!'", placeholder)
    }

    fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }
}

fn authority_from_row(row: &AnyRow) -> Result<Authority, DbError> {
    let google_calendar = match get_opt_string(row, "calendar_id")? {
        Some(calendar_id) => Some(GoogleCalendarLink {
            calendar_id,
            access_token: get_opt_string(row, "calendar_access_token")?,
            refresh_token: get_opt_string(row, "calendar_refresh_token")?,
            connected: get_bool(row, "calendar_connected")?,
        }),
        None => None,
    };

    Ok(Authority {
        id: get_uuid(row, "id")?,
        name: get_string(row, "name")?,
        email: get_string(row, "email")?,
        phone: get_opt_string(row, "phone")?,
        role: get_string(row, "role")?,
        department: get_string(row, "department")?,
        jurisdiction: Jurisdiction {
            region: get_string(row, "region")?,
            sub_regions: get_json(row, "sub_regions")?,
        },
        alert_types: get_json(row, "alert_types")?,
        priority: get_i64(row, "priority")?,
        google_calendar,
        is_active: get_bool(row, "is_active")?,
        created_at: get_time(row, "created_at")?,
        updated_at: get_time(row, "updated_at")?,
    })
}

impl AuthorityRepository for SqlAuthorityRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing authority schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS authorities (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone TEXT,
                role TEXT NOT NULL,
                department TEXT NOT NULL,
                region TEXT NOT NULL,
                sub_regions TEXT NOT NULL,
                alert_types TEXT NOT NULL,
                priority BIGINT NOT NULL,
                calendar_id TEXT,
                calendar_access_token TEXT,
                calendar_refresh_token TEXT,
                calendar_connected BIGINT NOT NULL DEFAULT 0,
                is_active BIGINT NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_authorities_active_priority \
                 ON authorities (is_active, priority)",
            )
            .await?;

        info!("Authority schema initialized successfully");
        Ok(())
    }

    async fn upsert_authority(&self, authority: Authority) -> Result<Authority, DbError> {
        debug!("Upserting authority: {}", authority.email);

        // Calendar columns are only replaced when the incoming record carries a calendar link.
        let query = r#"
            INSERT INTO authorities (
                id, name, email, phone, role, department, region, sub_regions, alert_types,
                priority, calendar_id, calendar_access_token, calendar_refresh_token,
                calendar_connected, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (email) DO UPDATE SET
                name = excluded.name,
                phone = excluded.phone,
                role = excluded.role,
                department = excluded.department,
                region = excluded.region,
                sub_regions = excluded.sub_regions,
                alert_types = excluded.alert_types,
                priority = excluded.priority,
                calendar_id = COALESCE(excluded.calendar_id, authorities.calendar_id),
                calendar_access_token = CASE WHEN excluded.calendar_id IS NULL
                    THEN authorities.calendar_access_token ELSE excluded.calendar_access_token END,
                calendar_refresh_token = CASE WHEN excluded.calendar_id IS NULL
                    THEN authorities.calendar_refresh_token ELSE excluded.calendar_refresh_token END,
                calendar_connected = CASE WHEN excluded.calendar_id IS NULL
                    THEN authorities.calendar_connected ELSE excluded.calendar_connected END,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at
        "#;

        let calendar = authority.google_calendar.as_ref();
        sqlx::query(query)
            .bind(authority.id.to_string())
            .bind(&authority.name)
            .bind(&authority.email)
            .bind(authority.phone.clone())
            .bind(&authority.role)
            .bind(&authority.department)
            .bind(&authority.jurisdiction.region)
            .bind(encode_json("sub_regions", &authority.jurisdiction.sub_regions)?)
            .bind(encode_json("alert_types", &authority.alert_types)?)
            .bind(authority.priority)
            .bind(calendar.map(|c| c.calendar_id.clone()))
            .bind(calendar.and_then(|c| c.access_token.clone()))
            .bind(calendar.and_then(|c| c.refresh_token.clone()))
            .bind(encode_bool(calendar.is_some_and(|c| c.connected)))
            .bind(encode_bool(authority.is_active))
            .bind(encode_time(&authority.created_at))
            .bind(encode_time(&authority.updated_at))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert authority {}: {}", authority.email, e);
                DbError::from_query(e)
            })?;

        let stored = self.find_by_email(&authority.email).await?.ok_or_else(|| {
            DbError::QueryError(format!("authority {} vanished after upsert", authority.email))
        })?;

        info!("Authority {} stored", stored.email);
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Authority>, DbError> {
        debug!("Finding authority by email: {}", email);

        let query = format!("SELECT {} FROM authorities WHERE email = $1", AUTHORITY_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find authority: {}", e);
                DbError::from_query(e)
            })?;

        row.as_ref().map(authority_from_row).transpose()
    }

    async fn find_responsible(
        &self,
        alert_type: &str,
        required_departments: &[String],
        region: Option<&str>,
    ) -> Result<Vec<Authority>, DbError> {
        debug!(
            "Finding authorities for alert type {} (departments {:?}, region {:?})",
            alert_type, required_departments, region
        );

        let mut conditions = Conditions::default();
        conditions.push("is_active = 1".to_string());
        let tagged = conditions.tagged_for(alert_type);
        if required_departments.is_empty() {
            conditions.push(tagged);
        } else {
            let departments: Vec<String> = required_departments
                .iter()
                .map(|d| conditions.bind(d.as_str()))
                .collect();
            conditions.push(format!(
                "({} OR department IN ({}))",
                tagged,
                departments.join(", ")
            ));
        }
        if let Some(region) = region {
            let placeholder = conditions.bind(region);
            conditions.push(format!("region = {}", placeholder));
        }

        // LIKE and `=` may ignore case depending on the backend
        let matches: Vec<Authority> = self
            .fetch_where(&conditions)
            .await?
            .into_iter()
            .filter(|a| a.is_responsible_for(alert_type, required_departments))
            .filter(|a| region.map_or(true, |r| a.jurisdiction.region == r))
            .collect();

        debug!("{} authorities responsible for {}", matches.len(), alert_type);
        Ok(matches)
    }

    async fn list(&self, filter: &AuthorityFilter) -> Result<Vec<Authority>, DbError> {
        let mut conditions = Conditions::default();
        if !filter.include_inactive {
            conditions.push("is_active = 1".to_string());
        }
        if let Some(department) = &filter.department {
            let placeholder = conditions.bind(department.as_str());
            conditions.push(format!("department = {}", placeholder));
        }
        if let Some(region) = &filter.region {
            let placeholder = conditions.bind(region.as_str());
            conditions.push(format!("region = {}", placeholder));
        }
        if let Some(alert_type) = &filter.alert_type {
            let tagged = conditions.tagged_for(alert_type);
            conditions.push(tagged);
        }

        let all = self.fetch_where(&conditions).await?;
        Ok(all.into_iter().filter(|a| filter.matches(a)).collect())
    }

    async fn deactivate(&self, email: &str) -> Result<bool, DbError> {
        debug!("Deactivating authority: {}", email);

        let result = sqlx::query(
            r#"
            UPDATE authorities
            SET is_active = 0, updated_at = $1
            WHERE email = $2
            "#,
        )
        .bind(encode_time(&Utc::now()))
        .bind(email)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to deactivate authority: {}", e);
            DbError::from_query(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
