// --- File: crates/slotify_common/src/models.rs ---
//
// Domain records shared by the storage layer and the ChainSync feature.
// Wire format is camelCase to match the existing dashboard clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::services::CalendarCredentials;

pub use slotify_config::{AlertPolicy, Severity, SeverityPolicy, UnknownSeverity};

/// Area an authority is responsible for.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    pub region: String,
    #[serde(default)]
    pub sub_regions: Vec<String>,
}

/// Google Calendar connection of an authority. Tokens are write-only on the API.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarLink {
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub connected: bool,
}

pub fn default_calendar_id() -> String {
    "primary".to_string()
}

impl fmt::Debug for GoogleCalendarLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCalendarLink")
            .field("calendar_id", &self.calendar_id)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

/// A person who can be pulled into an emergency meeting.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authority {
    pub id: Uuid,
    pub name: String,
    /// Unique key for upserts.
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub department: String,
    pub jurisdiction: Jurisdiction,
    /// Alert types this authority is explicitly tagged for.
    pub alert_types: Vec<String>,
    /// Lower is served first.
    pub priority: i64,
    pub google_calendar: Option<GoogleCalendarLink>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_AUTHORITY_PRIORITY: i64 = 100;

impl Authority {
    /// Tagged for the alert type, or in one of the required departments.
    /// Both comparisons are exact, like the stored policy lookup.
    pub fn is_responsible_for(&self, alert_type: &str, required_departments: &[String]) -> bool {
        self.alert_types.iter().any(|t| t == alert_type)
            || required_departments.contains(&self.department)
    }

    pub fn has_connected_calendar(&self) -> bool {
        self.google_calendar.as_ref().is_some_and(|link| {
            link.connected && (link.access_token.is_some() || link.refresh_token.is_some())
        })
    }

    /// Credentials for writing to this authority's calendar, if connected.
    pub fn calendar_credentials(&self) -> Option<CalendarCredentials> {
        if !self.has_connected_calendar() {
            return None;
        }
        self.google_calendar.as_ref().map(|link| CalendarCredentials {
            calendar_id: link.calendar_id.clone(),
            access_token: link.access_token.clone(),
            refresh_token: link.refresh_token.clone(),
        })
    }
}

/// Stored policy for one alert type.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConfig {
    /// Unique key for upserts.
    pub alert_type: String,
    pub description: Option<String>,
    pub policy: AlertPolicy,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub region: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Snapshot of the alert that triggered a meeting.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetails {
    pub alert_type: String,
    pub severity: Severity,
    pub location: Option<Location>,
    pub description: Option<String>,
    pub affected_area: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingWindow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Tentative,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub status: AttendeeStatus,
}

impl From<&Authority> for Attendee {
    fn from(authority: &Authority) -> Self {
        Self {
            email: authority.email.clone(),
            name: authority.name.clone(),
            role: authority.role.clone(),
            department: authority.department.clone(),
            status: AttendeeStatus::Pending,
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::InProgress => "in_progress",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "scheduled" => Ok(MeetingStatus::Scheduled),
            "in_progress" => Ok(MeetingStatus::InProgress),
            "completed" => Ok(MeetingStatus::Completed),
            "cancelled" | "canceled" => Ok(MeetingStatus::Cancelled),
            _ => Err(format!(
                "unknown meeting status '{}', expected one of scheduled, in_progress, completed, cancelled",
                s
            )),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNote {
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// The persisted outcome of scheduling a meeting for an alert.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMeeting {
    pub id: Uuid,
    pub alert_id: String,
    pub alert: AlertDetails,
    pub meeting: MeetingWindow,
    pub attendees: Vec<Attendee>,
    pub google_event_id: Option<String>,
    pub google_meet_link: Option<String>,
    /// Why calendar provisioning was skipped or failed.
    pub calendar_error: Option<String>,
    pub status: MeetingStatus,
    pub notes: Vec<MeetingNote>,
    pub scheduled_by: String,
    pub emergency_override: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority(department: &str, alert_types: &[&str]) -> Authority {
        let now = Utc::now();
        Authority {
            id: Uuid::new_v4(),
            name: "Dana Reyes".into(),
            email: "dana@county.gov".into(),
            phone: None,
            role: "Duty Officer".into(),
            department: department.into(),
            jurisdiction: Jurisdiction {
                region: "north".into(),
                sub_regions: vec![],
            },
            alert_types: alert_types.iter().map(|s| s.to_string()).collect(),
            priority: DEFAULT_AUTHORITY_PRIORITY,
            google_calendar: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn responsibility_by_tag_or_department() {
        let required = vec!["operations".to_string()];
        assert!(authority("fire", &["wildfire"]).is_responsible_for("wildfire", &required));
        assert!(authority("operations", &[]).is_responsible_for("flood", &required));
        assert!(!authority("finance", &["flood"]).is_responsible_for("wildfire", &required));
    }

    #[test]
    fn responsibility_is_case_sensitive() {
        let required = vec!["operations".to_string()];
        assert!(!authority("Operations", &[]).is_responsible_for("flood", &required));
        assert!(!authority("finance", &["Wildfire"]).is_responsible_for("wildfire", &required));
    }

    #[test]
    fn calendar_credentials_require_connection_and_token() {
        let mut a = authority("operations", &[]);
        assert!(a.calendar_credentials().is_none());

        a.google_calendar = Some(GoogleCalendarLink {
            calendar_id: "primary".into(),
            access_token: None,
            refresh_token: None,
            connected: true,
        });
        assert!(!a.has_connected_calendar());

        a.google_calendar = Some(GoogleCalendarLink {
            calendar_id: "ops@county.gov".into(),
            access_token: Some("token".into()),
            refresh_token: None,
            connected: true,
        });
        let creds = a.calendar_credentials().unwrap();
        assert_eq!(creds.calendar_id, "ops@county.gov");
    }

    #[test]
    fn calendar_tokens_never_serialized() {
        let mut a = authority("operations", &[]);
        a.google_calendar = Some(GoogleCalendarLink {
            calendar_id: "primary".into(),
            access_token: Some("ya29.secret".into()),
            refresh_token: Some("1//refresh".into()),
            connected: true,
        });
        let json = serde_json::to_string(&a).unwrap();
        assert!(!json.contains("ya29"));
        assert!(!json.contains("refresh"));
        assert!(json.contains("\"googleCalendar\""));
    }

    #[test]
    fn meeting_status_parsing() {
        assert_eq!("in-progress".parse(), Ok(MeetingStatus::InProgress));
        assert_eq!("Cancelled".parse(), Ok(MeetingStatus::Cancelled));
        assert!("postponed".parse::<MeetingStatus>().is_err());
        assert_eq!(
            serde_json::to_value(MeetingStatus::InProgress).unwrap(),
            "in_progress"
        );
    }
}
