//! SQL implementation of the alert meeting repository

use crate::error::DbError;
use crate::repositories::alert_meeting::{
    AlertMeeting, AlertMeetingRepository, MeetingFilter, MeetingUpdate, DEFAULT_LIST_LIMIT,
};
use crate::repositories::codec::{
    encode_bool, encode_json, encode_time, get_bool, get_i64, get_json, get_opt_string,
    get_string, get_time, get_uuid,
};
use crate::DbClient;
use slotify_common::models::{MeetingStatus, MeetingWindow};
use sqlx::any::AnyRow;
use tracing::{debug, error, info};
use uuid::Uuid;

const MEETING_COLUMNS: &str = "id, alert_id, alert, start_time, end_time, duration_minutes, \
     attendees, google_event_id, google_meet_link, calendar_error, status, notes, scheduled_by, \
     emergency_override, created_at, updated_at";

/// SQL implementation of the alert meeting repository
#[derive(Debug, Clone)]
pub struct SqlAlertMeetingRepository {
    db_client: DbClient,
    default_limit: i64,
}

impl SqlAlertMeetingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self {
            db_client,
            default_limit: DEFAULT_LIST_LIMIT,
        }
    }

    /// Page size used when a listing doesn't ask for one.
    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }
}

fn parse_status(raw: &str) -> Result<MeetingStatus, DbError> {
    raw.parse().map_err(|e: String| DbError::decode("status", e))
}

fn alert_meeting_from_row(row: &AnyRow) -> Result<AlertMeeting, DbError> {
    Ok(AlertMeeting {
        id: get_uuid(row, "id")?,
        alert_id: get_string(row, "alert_id")?,
        alert: get_json(row, "alert")?,
        meeting: MeetingWindow {
            start_time: get_time(row, "start_time")?,
            end_time: get_time(row, "end_time")?,
            duration_minutes: get_i64(row, "duration_minutes")?,
        },
        attendees: get_json(row, "attendees")?,
        google_event_id: get_opt_string(row, "google_event_id")?,
        google_meet_link: get_opt_string(row, "google_meet_link")?,
        calendar_error: get_opt_string(row, "calendar_error")?,
        status: parse_status(&get_string(row, "status")?)?,
        notes: get_json(row, "notes")?,
        scheduled_by: get_string(row, "scheduled_by")?,
        emergency_override: get_bool(row, "emergency_override")?,
        created_at: get_time(row, "created_at")?,
        updated_at: get_time(row, "updated_at")?,
    })
}

impl AlertMeetingRepository for SqlAlertMeetingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing alert meeting schema");

        // alert_type and severity are copied out of the alert JSON for filtering
        let query = r#"
            CREATE TABLE IF NOT EXISTS alert_meetings (
                id TEXT PRIMARY KEY,
                alert_id TEXT NOT NULL,
                alert_type TEXT NOT NULL,
                severity TEXT NOT NULL,
                alert TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                duration_minutes BIGINT NOT NULL,
                attendees TEXT NOT NULL,
                google_event_id TEXT,
                google_meet_link TEXT,
                calendar_error TEXT,
                status TEXT NOT NULL,
                notes TEXT NOT NULL,
                scheduled_by TEXT NOT NULL,
                emergency_override BIGINT NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_alert_meetings_alert_id \
                 ON alert_meetings (alert_id)",
            )
            .await?;
        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_alert_meetings_created_at \
                 ON alert_meetings (created_at)",
            )
            .await?;

        info!("Alert meeting schema initialized successfully");
        Ok(())
    }

    async fn insert_meeting(&self, meeting: AlertMeeting) -> Result<AlertMeeting, DbError> {
        debug!("Inserting meeting {} for alert {}", meeting.id, meeting.alert_id);

        let query = format!(
            "INSERT INTO alert_meetings ({}, alert_type, severity) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)",
            MEETING_COLUMNS
        );

        sqlx::query(&query)
            .bind(meeting.id.to_string())
            .bind(&meeting.alert_id)
            .bind(encode_json("alert", &meeting.alert)?)
            .bind(encode_time(&meeting.meeting.start_time))
            .bind(encode_time(&meeting.meeting.end_time))
            .bind(meeting.meeting.duration_minutes)
            .bind(encode_json("attendees", &meeting.attendees)?)
            .bind(meeting.google_event_id.clone())
            .bind(meeting.google_meet_link.clone())
            .bind(meeting.calendar_error.clone())
            .bind(meeting.status.as_str())
            .bind(encode_json("notes", &meeting.notes)?)
            .bind(&meeting.scheduled_by)
            .bind(encode_bool(meeting.emergency_override))
            .bind(encode_time(&meeting.created_at))
            .bind(encode_time(&meeting.updated_at))
            .bind(&meeting.alert.alert_type)
            .bind(meeting.alert.severity.as_str())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert meeting for alert {}: {}", meeting.alert_id, e);
                DbError::from_query(e)
            })?;

        let stored = self.find_by_id(meeting.id).await?.ok_or_else(|| {
            DbError::QueryError(format!("meeting {} vanished after insert", meeting.id))
        })?;

        info!("Meeting {} stored for alert {}", stored.id, stored.alert_id);
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AlertMeeting>, DbError> {
        let query = format!("SELECT {} FROM alert_meetings WHERE id = $1", MEETING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find meeting {}: {}", id, e);
                DbError::from_query(e)
            })?;

        row.as_ref().map(alert_meeting_from_row).transpose()
    }

    async fn find_by_alert_id(&self, alert_id: &str) -> Result<Vec<AlertMeeting>, DbError> {
        debug!("Finding meetings for alert {}", alert_id);

        let query = format!(
            "SELECT {} FROM alert_meetings WHERE alert_id = $1 ORDER BY created_at DESC",
            MEETING_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(alert_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find meetings for alert {}: {}", alert_id, e);
                DbError::from_query(e)
            })?;

        rows.iter().map(alert_meeting_from_row).collect()
    }

    async fn list(&self, filter: &MeetingFilter) -> Result<Vec<AlertMeeting>, DbError> {
        let mut conditions = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            binds.push(status.as_str().to_string());
            conditions.push(format!("status = ${}", binds.len()));
        }
        if let Some(severity) = filter.severity {
            binds.push(severity.as_str().to_string());
            conditions.push(format!("severity = ${}", binds.len()));
        }
        if let Some(alert_type) = &filter.alert_type {
            binds.push(alert_type.clone());
            conditions.push(format!("alert_type = ${}", binds.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        // limit is clamped to a small integer, safe to inline
        let query = format!(
            "SELECT {} FROM alert_meetings {} ORDER BY created_at DESC LIMIT {}",
            MEETING_COLUMNS,
            where_clause,
            filter.effective_limit(self.default_limit)
        );
        debug!("Listing meetings: {}", query);

        let mut statement = sqlx::query(&query);
        for value in &binds {
            statement = statement.bind(value.as_str());
        }

        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list meetings: {}", e);
                DbError::from_query(e)
            })?;

        rows.iter().map(alert_meeting_from_row).collect()
    }

    async fn update_meeting(
        &self,
        id: Uuid,
        update: MeetingUpdate,
    ) -> Result<Option<AlertMeeting>, DbError> {
        debug!("Updating meeting {}", id);

        let mut tx = self.db_client.begin().await?;

        let query = format!("SELECT {} FROM alert_meetings WHERE id = $1", MEETING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::from_query)?;

        // dropping tx rolls back
        let Some(row) = row else {
            return Ok(None);
        };

        let mut meeting = alert_meeting_from_row(&row)?;
        if let Some(status) = update.status {
            meeting.status = status;
        }
        if let Some(note) = update.note {
            meeting.notes.push(note);
        }
        meeting.updated_at = update.updated_at;

        sqlx::query(
            r#"
            UPDATE alert_meetings
            SET status = $1, notes = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(meeting.status.as_str())
        .bind(encode_json("notes", &meeting.notes)?)
        .bind(encode_time(&meeting.updated_at))
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to update meeting {}: {}", id, e);
            DbError::from_query(e)
        })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Meeting {} updated (status {})", id, meeting.status);
        Ok(Some(meeting))
    }
}
