// --- File: crates/slotify_chainsync/src/logic.rs ---
//! Scheduling pipeline and management operations.
//!
//! Everything here is independent of axum; handlers only extract, call one
//! function and wrap the result in the response envelope.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use slotify_common::models::{
    AlertConfig, AlertDetails, AlertMeeting, AlertPolicy, Attendee, Authority, GoogleCalendarLink,
    Jurisdiction, Location, MeetingNote, MeetingStatus, MeetingWindow, Severity, SeverityPolicy,
    DEFAULT_AUTHORITY_PRIORITY,
};
use slotify_common::services::{
    BoxedError, CalendarEvent, CalendarEventResult, CalendarService, EventAttendee,
};
use slotify_db::{
    AlertConfigRepository, AlertMeetingRepository, AuthorityFilter, AuthorityRepository,
    MeetingFilter, MeetingUpdate,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CalendarError, ChainsyncError};
use crate::handlers::ChainsyncState;

/// Slot granularity in minutes for regular and emergency tiers.
pub const REGULAR_SLOT_MINUTES: i64 = 15;
pub const EMERGENCY_SLOT_MINUTES: i64 = 5;

const DEFAULT_SCHEDULED_BY: &str = "system";
const DEFAULT_ALERT_SOURCE: &str = "external";

// --- Request / Response Types ---

/// Body of `POST /schedule-meeting`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMeetingRequest {
    pub alert_id: Option<String>,
    pub alert_type: Option<String>,
    /// One of `low`, `medium`, `high`, `critical`.
    pub severity: Option<String>,
    pub location: Option<Location>,
    pub description: Option<String>,
    pub affected_area: Option<String>,
    /// When the alert was raised. Defaults to the time of intake.
    pub timestamp: Option<DateTime<Utc>>,
    pub source: Option<String>,
}

/// What intake did with an alert.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScheduleOutcome {
    /// The tier doesn't auto-schedule; nothing was stored.
    NotificationOnly {
        #[serde(rename = "alertId")]
        alert_id: String,
        severity: Severity,
    },
    MeetingScheduled { meeting: AlertMeeting },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct MeetingListQuery {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub alert_type: Option<String>,
    /// Page size, default 50, at most 200.
    pub limit: Option<i64>,
}

/// Body of `PATCH /meetings/{meetingId}/status`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    /// Appended to the meeting notes when present.
    pub note: Option<String>,
    pub author: Option<String>,
}

/// Body of `POST /meetings/{meetingId}/notes`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionRequest {
    pub region: Option<String>,
    #[serde(default)]
    pub sub_regions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CalendarLinkRequest {
    /// Defaults to `primary`.
    pub calendar_id: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Body of `POST /authorities`. Upserts by email.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuthorityRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub jurisdiction: Option<JurisdictionRequest>,
    #[serde(default)]
    pub alert_types: Vec<String>,
    /// Lower is served first. Defaults to 100.
    pub priority: Option<i64>,
    pub google_calendar: Option<CalendarLinkRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct AuthorityListQuery {
    pub department: Option<String>,
    pub region: Option<String>,
    pub alert_type: Option<String>,
    pub include_inactive: Option<bool>,
}

/// Tiers left out fall back to the configured default policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PartialAlertPolicy {
    pub low: Option<SeverityPolicy>,
    pub medium: Option<SeverityPolicy>,
    pub high: Option<SeverityPolicy>,
    pub critical: Option<SeverityPolicy>,
}

impl PartialAlertPolicy {
    pub fn merge_onto(self, default: AlertPolicy) -> AlertPolicy {
        AlertPolicy {
            low: self.low.unwrap_or(default.low),
            medium: self.medium.unwrap_or(default.medium),
            high: self.high.unwrap_or(default.high),
            critical: self.critical.unwrap_or(default.critical),
        }
    }
}

/// Body of `POST /config`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AlertConfigRequest {
    pub alert_type: Option<String>,
    pub description: Option<String>,
    pub policy: Option<PartialAlertPolicy>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// `ok` or `degraded`.
    pub status: String,
    pub enabled: bool,
    pub database: bool,
    pub calendar_provider: bool,
}

// --- Validation ---

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn missing_fields(fields: &[(&str, bool)]) -> ChainsyncError {
    let names: Vec<&str> = fields
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect();
    ChainsyncError::Validation(format!("Missing required fields: {}", names.join(", ")))
}

impl ScheduleMeetingRequest {
    /// Check required fields and parse the severity.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(String, AlertDetails), ChainsyncError> {
        let (alert_id, alert_type, severity) = match (
            present(&self.alert_id),
            present(&self.alert_type),
            present(&self.severity),
        ) {
            (Some(id), Some(alert_type), Some(severity)) => (id, alert_type, severity),
            (id, alert_type, severity) => {
                return Err(missing_fields(&[
                    ("alertId", id.is_some()),
                    ("alertType", alert_type.is_some()),
                    ("severity", severity.is_some()),
                ]))
            }
        };

        // ids are trimmed, severity must be one of the exact lowercase names
        let severity: Severity = self.severity.as_deref().unwrap_or(severity).parse()?;

        let alert = AlertDetails {
            alert_type: alert_type.to_string(),
            severity,
            location: self.location.clone(),
            description: self.description.clone(),
            affected_area: self.affected_area.clone(),
            timestamp: self.timestamp.unwrap_or(now),
            source: present(&self.source)
                .unwrap_or(DEFAULT_ALERT_SOURCE)
                .to_string(),
        };
        Ok((alert_id.to_string(), alert))
    }
}

fn parse_meeting_id(raw: &str) -> Result<Uuid, ChainsyncError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ChainsyncError::Validation(format!("Invalid meeting id '{}'", raw)))
}

fn parse_status(raw: &str) -> Result<MeetingStatus, ChainsyncError> {
    raw.parse().map_err(ChainsyncError::Validation)
}

fn scheduled_by(state: &ChainsyncState) -> String {
    state
        .config
        .chainsync
        .as_ref()
        .and_then(|c| c.scheduled_by.clone())
        .unwrap_or_else(|| DEFAULT_SCHEDULED_BY.to_string())
}

// --- Policy & Slot ---

/// The tier for `severity`: stored config if active, else the default policy.
pub fn resolve_severity_policy(
    stored: Option<&AlertConfig>,
    default_policy: &AlertPolicy,
    severity: Severity,
) -> SeverityPolicy {
    stored
        .filter(|c| c.is_active)
        .map(|c| &c.policy)
        .unwrap_or(default_policy)
        .tier(severity)
        .clone()
}

pub fn slot_step_minutes(emergency_override: bool) -> i64 {
    if emergency_override {
        EMERGENCY_SLOT_MINUTES
    } else {
        REGULAR_SLOT_MINUTES
    }
}

/// Meeting window starting at the next slot boundary at or after `now`.
///
/// Attendee calendars are not consulted.
pub fn compute_meeting_slot(now: DateTime<Utc>, policy: &SeverityPolicy) -> MeetingWindow {
    let step = slot_step_minutes(policy.emergency_override);
    let past_boundary = Duration::seconds(now.timestamp().rem_euclid(step * 60))
        + Duration::nanoseconds(i64::from(now.timestamp_subsec_nanos()));

    let start_time = if past_boundary == Duration::zero() {
        now
    } else {
        now - past_boundary + Duration::minutes(step)
    };

    MeetingWindow {
        start_time,
        end_time: start_time + Duration::minutes(policy.meeting_duration),
        duration_minutes: policy.meeting_duration,
    }
}

// --- Authorities ---

/// Active authorities for the alert, lowest priority value first.
pub async fn find_responsible_authorities(
    state: &ChainsyncState,
    alert_type: &str,
    tier: &SeverityPolicy,
    region: Option<&str>,
) -> Result<Vec<Authority>, ChainsyncError> {
    Ok(state
        .authorities
        .find_responsible(alert_type, &tier.required_departments, region)
        .await?)
}

// --- Calendar ---

pub fn event_summary(alert: &AlertDetails) -> String {
    format!(
        "[{}] {} alert response",
        alert.severity.as_str().to_uppercase(),
        alert.alert_type
    )
}

pub fn event_description(alert_id: &str, alert: &AlertDetails) -> String {
    let mut lines = vec![
        format!("Emergency meeting for alert {}", alert_id),
        format!("Alert type: {}", alert.alert_type),
        format!("Severity: {}", alert.severity.as_str().to_uppercase()),
    ];
    if let Some(description) = &alert.description {
        lines.push(format!("Description: {}", description));
    }
    if let Some(area) = &alert.affected_area {
        lines.push(format!("Affected area: {}", area));
    }
    if let Some(location) = &alert.location {
        let mut parts = Vec::new();
        if let Some(address) = &location.address {
            parts.push(address.clone());
        }
        if let Some(region) = &location.region {
            parts.push(region.clone());
        }
        if let (Some(lat), Some(lon)) = (location.latitude, location.longitude) {
            parts.push(format!("({:.5}, {:.5})", lat, lon));
        }
        if !parts.is_empty() {
            lines.push(format!("Location: {}", parts.join(", ")));
        }
    }
    lines.push(format!("Source: {}", alert.source));
    lines.join("\n")
}

pub fn build_calendar_event(
    alert_id: &str,
    alert: &AlertDetails,
    window: &MeetingWindow,
    authorities: &[Authority],
) -> CalendarEvent {
    CalendarEvent {
        start_time: window.start_time,
        end_time: window.end_time,
        summary: event_summary(alert),
        description: Some(event_description(alert_id, alert)),
        attendees: authorities
            .iter()
            .map(|a| EventAttendee {
                email: a.email.clone(),
                display_name: Some(a.name.clone()),
            })
            .collect(),
        with_conference: true,
    }
}

/// Create the event on the first connected calendar, in priority order.
///
/// The caller owns the degrade policy: an `Err` never aborts scheduling.
pub async fn provision_calendar_event(
    service: Option<&dyn CalendarService<Error = BoxedError>>,
    authorities: &[Authority],
    alert_id: &str,
    alert: &AlertDetails,
    window: &MeetingWindow,
) -> Result<CalendarEventResult, CalendarError> {
    let (organizer, credentials) = authorities
        .iter()
        .find_map(|a| a.calendar_credentials().map(|c| (a, c)))
        .ok_or(CalendarError::NoOrganizer)?;
    let service = service.ok_or(CalendarError::ProviderDisabled)?;

    debug!(
        "Provisioning calendar event for alert {} on {}'s calendar",
        alert_id, organizer.email
    );
    let event = build_calendar_event(alert_id, alert, window, authorities);
    Ok(service.create_event(&credentials, event).await?)
}

// --- Pipeline ---

/// Intake an alert and schedule its meeting if the severity tier asks for one.
pub async fn schedule_alert_meeting(
    state: &ChainsyncState,
    request: ScheduleMeetingRequest,
    now: DateTime<Utc>,
) -> Result<ScheduleOutcome, ChainsyncError> {
    let (alert_id, alert) = request.validate(now)?;
    info!(
        "Alert {} received: type={}, severity={}",
        alert_id, alert.alert_type, alert.severity
    );

    let stored = state.alert_configs.find_active(&alert.alert_type).await?;
    if stored.is_none() {
        debug!("No stored policy for '{}', using default", alert.alert_type);
    }
    let default_policy = state.config.default_alert_policy();
    let tier = resolve_severity_policy(stored.as_ref(), &default_policy, alert.severity);

    if !tier.auto_schedule {
        info!(
            "Alert {} ({}) does not auto-schedule, notification only",
            alert_id, alert.severity
        );
        return Ok(ScheduleOutcome::NotificationOnly {
            alert_id,
            severity: alert.severity,
        });
    }

    let region = alert.location.as_ref().and_then(|l| l.region.as_deref());
    let authorities =
        find_responsible_authorities(state, &alert.alert_type, &tier, region).await?;
    if authorities.is_empty() {
        warn!("No responsible authorities for alert {} ({})", alert_id, alert.alert_type);
        return Err(ChainsyncError::NoResponsibleAuthorities(alert.alert_type));
    }

    let window = compute_meeting_slot(now, &tier);
    info!(
        "Alert {}: {} attendees, slot {} - {}",
        alert_id,
        authorities.len(),
        window.start_time,
        window.end_time
    );

    let provisioned = provision_calendar_event(
        state.calendar_service.as_deref(),
        &authorities,
        &alert_id,
        &alert,
        &window,
    )
    .await;
    let (google_event_id, google_meet_link, calendar_error) = match provisioned {
        Ok(result) => (result.event_id, result.meet_link, None),
        Err(err) => {
            warn!("Calendar event for alert {} not created: {}", alert_id, err);
            (None, None, Some(err.to_string()))
        }
    };

    let meeting = AlertMeeting {
        id: Uuid::new_v4(),
        alert_id,
        alert,
        meeting: window,
        attendees: authorities.iter().map(Attendee::from).collect(),
        google_event_id,
        google_meet_link,
        calendar_error,
        status: MeetingStatus::Scheduled,
        notes: Vec::new(),
        scheduled_by: scheduled_by(state),
        emergency_override: tier.emergency_override,
        created_at: now,
        updated_at: now,
    };

    let meeting = state.meetings.insert_meeting(meeting).await?;
    info!("Meeting {} scheduled for alert {}", meeting.id, meeting.alert_id);
    Ok(ScheduleOutcome::MeetingScheduled { meeting })
}

// --- Meetings ---

pub async fn list_meetings_for_alert(
    state: &ChainsyncState,
    alert_id: &str,
) -> Result<Vec<AlertMeeting>, ChainsyncError> {
    let alert_id = alert_id.trim();
    if alert_id.is_empty() {
        return Err(ChainsyncError::Validation("alertId is required".to_string()));
    }
    Ok(state.meetings.find_by_alert_id(alert_id).await?)
}

impl MeetingListQuery {
    pub fn to_filter(&self) -> Result<MeetingFilter, ChainsyncError> {
        Ok(MeetingFilter {
            status: present(&self.status).map(parse_status).transpose()?,
            severity: present(&self.severity)
                .map(|s| s.parse::<Severity>())
                .transpose()?,
            alert_type: present(&self.alert_type).map(str::to_string),
            limit: self.limit,
        })
    }
}

pub async fn list_meetings(
    state: &ChainsyncState,
    query: &MeetingListQuery,
) -> Result<Vec<AlertMeeting>, ChainsyncError> {
    let filter = query.to_filter()?;
    Ok(state.meetings.list(&filter).await?)
}

async fn apply_meeting_update(
    state: &ChainsyncState,
    meeting_id: &str,
    update: MeetingUpdate,
) -> Result<AlertMeeting, ChainsyncError> {
    let id = parse_meeting_id(meeting_id)?;
    state
        .meetings
        .update_meeting(id, update)
        .await?
        .ok_or_else(|| ChainsyncError::NotFound(format!("Meeting {}", id)))
}

/// Set the status, appending the optional note. Last write wins.
pub async fn update_meeting_status(
    state: &ChainsyncState,
    meeting_id: &str,
    request: UpdateStatusRequest,
    now: DateTime<Utc>,
) -> Result<AlertMeeting, ChainsyncError> {
    let status = present(&request.status)
        .ok_or_else(|| missing_fields(&[("status", false)]))
        .and_then(parse_status)?;

    let note = present(&request.note).map(|content| MeetingNote {
        content: content.to_string(),
        author: present(&request.author)
            .map(str::to_string)
            .unwrap_or_else(|| scheduled_by(state)),
        created_at: now,
    });

    let meeting = apply_meeting_update(
        state,
        meeting_id,
        MeetingUpdate {
            status: Some(status),
            note,
            updated_at: now,
        },
    )
    .await?;
    info!("Meeting {} is now {}", meeting.id, meeting.status);
    Ok(meeting)
}

pub async fn add_meeting_note(
    state: &ChainsyncState,
    meeting_id: &str,
    request: AddNoteRequest,
    now: DateTime<Utc>,
) -> Result<AlertMeeting, ChainsyncError> {
    let content = present(&request.content).ok_or_else(|| missing_fields(&[("content", false)]))?;
    let note = MeetingNote {
        content: content.to_string(),
        author: present(&request.author)
            .map(str::to_string)
            .unwrap_or_else(|| scheduled_by(state)),
        created_at: now,
    };

    apply_meeting_update(
        state,
        meeting_id,
        MeetingUpdate {
            status: None,
            note: Some(note),
            updated_at: now,
        },
    )
    .await
}

// --- Authority management ---

impl AuthorityRequest {
    pub fn into_authority(self, now: DateTime<Utc>) -> Result<Authority, ChainsyncError> {
        let region = self
            .jurisdiction
            .as_ref()
            .and_then(|j| present(&j.region))
            .map(str::to_string);

        let (name, email, role, department, region) = match (
            present(&self.name),
            present(&self.email),
            present(&self.role),
            present(&self.department),
            region,
        ) {
            (Some(name), Some(email), Some(role), Some(department), Some(region)) => {
                (name, email, role, department, region)
            }
            (name, email, role, department, region) => {
                return Err(missing_fields(&[
                    ("name", name.is_some()),
                    ("email", email.is_some()),
                    ("role", role.is_some()),
                    ("department", department.is_some()),
                    ("jurisdiction.region", region.is_some()),
                ]))
            }
        };

        let email = email.to_ascii_lowercase();
        if !email.contains('@') {
            return Err(ChainsyncError::Validation(format!(
                "Invalid email address '{}'",
                email
            )));
        }

        let google_calendar = self.google_calendar.map(|link| {
            let access_token = present(&link.access_token).map(str::to_string);
            let refresh_token = present(&link.refresh_token).map(str::to_string);
            GoogleCalendarLink {
                calendar_id: present(&link.calendar_id)
                    .map(str::to_string)
                    .unwrap_or_else(slotify_common::models::default_calendar_id),
                connected: access_token.is_some() || refresh_token.is_some(),
                access_token,
                refresh_token,
            }
        });

        Ok(Authority {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email,
            phone: present(&self.phone).map(str::to_string),
            role: role.to_string(),
            department: department.to_string(),
            jurisdiction: Jurisdiction {
                region,
                sub_regions: self
                    .jurisdiction
                    .map(|j| j.sub_regions)
                    .unwrap_or_default(),
            },
            alert_types: self
                .alert_types
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            priority: self.priority.unwrap_or(DEFAULT_AUTHORITY_PRIORITY),
            google_calendar,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

pub async fn upsert_authority(
    state: &ChainsyncState,
    request: AuthorityRequest,
    now: DateTime<Utc>,
) -> Result<Authority, ChainsyncError> {
    let authority = request.into_authority(now)?;
    Ok(state.authorities.upsert_authority(authority).await?)
}

impl From<&AuthorityListQuery> for AuthorityFilter {
    fn from(query: &AuthorityListQuery) -> Self {
        AuthorityFilter {
            department: present(&query.department).map(str::to_string),
            region: present(&query.region).map(str::to_string),
            alert_type: present(&query.alert_type).map(str::to_string),
            include_inactive: query.include_inactive.unwrap_or(false),
        }
    }
}

pub async fn list_authorities(
    state: &ChainsyncState,
    query: &AuthorityListQuery,
) -> Result<Vec<Authority>, ChainsyncError> {
    Ok(state.authorities.list(&AuthorityFilter::from(query)).await?)
}

/// Soft delete by email.
pub async fn deactivate_authority(
    state: &ChainsyncState,
    email: &str,
) -> Result<(), ChainsyncError> {
    let email = email.trim().to_ascii_lowercase();
    if state.authorities.deactivate(&email).await? {
        info!("Authority {} deactivated", email);
        Ok(())
    } else {
        Err(ChainsyncError::NotFound(format!("Authority {}", email)))
    }
}

// --- Policy management ---

pub fn validate_policy(policy: &AlertPolicy) -> Result<(), ChainsyncError> {
    for severity in Severity::ALL {
        if policy.tier(severity).meeting_duration <= 0 {
            return Err(ChainsyncError::Validation(format!(
                "meetingDuration for {} must be positive",
                severity
            )));
        }
    }
    Ok(())
}

pub async fn upsert_alert_config(
    state: &ChainsyncState,
    request: AlertConfigRequest,
    now: DateTime<Utc>,
) -> Result<AlertConfig, ChainsyncError> {
    let alert_type = present(&request.alert_type)
        .ok_or_else(|| missing_fields(&[("alertType", false)]))?
        .to_string();

    let policy = request
        .policy
        .unwrap_or_default()
        .merge_onto(state.config.default_alert_policy());
    validate_policy(&policy)?;

    let config = AlertConfig {
        alert_type,
        description: present(&request.description).map(str::to_string),
        policy,
        is_active: request.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };
    let stored = state.alert_configs.upsert_config(config).await?;
    info!("Policy for alert type '{}' saved", stored.alert_type);
    Ok(stored)
}

pub async fn list_alert_configs(
    state: &ChainsyncState,
) -> Result<Vec<AlertConfig>, ChainsyncError> {
    Ok(state.alert_configs.find_all().await?)
}

// --- Health ---

pub async fn health(state: &ChainsyncState) -> HealthStatus {
    let database = state.db_client.is_healthy().await;
    HealthStatus {
        status: if database { "ok" } else { "degraded" }.to_string(),
        enabled: state.is_enabled(),
        database,
        calendar_provider: state.calendar_service.is_some(),
    }
}
