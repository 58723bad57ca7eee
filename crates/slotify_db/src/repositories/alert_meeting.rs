//! Repository for alert meetings
//!
//! Meetings are append-only records: they are never deleted, only their
//! status and notes change.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use slotify_common::models::{MeetingNote, MeetingStatus, Severity};
use uuid::Uuid;

pub use slotify_common::models::AlertMeeting;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 200;

/// Filters for listing meetings, newest first.
#[derive(Debug, Clone, Default)]
pub struct MeetingFilter {
    pub status: Option<MeetingStatus>,
    pub severity: Option<Severity>,
    pub alert_type: Option<String>,
    pub limit: Option<i64>,
}

impl MeetingFilter {
    /// Requested limit clamped to `1..=MAX_LIST_LIMIT`.
    pub fn effective_limit(&self, default_limit: i64) -> i64 {
        self.limit
            .unwrap_or(default_limit)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

/// A change to apply to a stored meeting.
#[derive(Debug, Clone)]
pub struct MeetingUpdate {
    pub status: Option<MeetingStatus>,
    pub note: Option<MeetingNote>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for alert meetings
pub trait AlertMeetingRepository {
    /// Create the `alert_meetings` table if it doesn't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn insert_meeting(
        &self,
        meeting: AlertMeeting,
    ) -> impl std::future::Future<Output = Result<AlertMeeting, DbError>> + Send;

    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<AlertMeeting>, DbError>> + Send;

    /// Every meeting scheduled for an alert, newest first.
    fn find_by_alert_id(
        &self,
        alert_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<AlertMeeting>, DbError>> + Send;

    fn list(
        &self,
        filter: &MeetingFilter,
    ) -> impl std::future::Future<Output = Result<Vec<AlertMeeting>, DbError>> + Send;

    /// Apply `update` in one transaction. `None` when the meeting doesn't exist.
    fn update_meeting(
        &self,
        id: Uuid,
        update: MeetingUpdate,
    ) -> impl std::future::Future<Output = Result<Option<AlertMeeting>, DbError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        let filter = MeetingFilter::default();
        assert_eq!(filter.effective_limit(DEFAULT_LIST_LIMIT), 50);

        let filter = MeetingFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(DEFAULT_LIST_LIMIT), MAX_LIST_LIMIT);

        let filter = MeetingFilter {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(DEFAULT_LIST_LIMIT), 1);
    }
}
