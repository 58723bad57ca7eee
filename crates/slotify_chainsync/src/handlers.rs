// File: crates/slotify_chainsync/src/handlers.rs
use crate::error::ChainsyncError;
use crate::logic::{
    self, AddNoteRequest, AlertConfigRequest, AuthorityListQuery, AuthorityRequest, HealthStatus,
    MeetingListQuery, ScheduleMeetingRequest, ScheduleOutcome, UpdateStatusRequest,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use slotify_common::models::{AlertConfig, AlertMeeting, Authority};
use slotify_common::services::{BoxedError, CalendarService};
use slotify_common::{is_chainsync_enabled, ApiResponse, SlotifyError};
use slotify_config::AppConfig;
use slotify_db::{
    AlertConfigRepository, AlertConfigRepositoryFactory, AlertMeetingRepository,
    AlertMeetingRepositoryFactory, AuthorityRepository, AuthorityRepositoryFactory, DbClient,
    DbError, RepositoryFactory, SqlAlertConfigRepository, SqlAlertMeetingRepository,
    SqlAuthorityRepository,
};
use std::sync::Arc;
use tracing::info;

type HandlerResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), SlotifyError>;

// Shared state for the ChainSync handlers
#[derive(Clone)]
pub struct ChainsyncState {
    pub config: Arc<AppConfig>,
    pub db_client: DbClient,
    pub authorities: SqlAuthorityRepository,
    pub alert_configs: SqlAlertConfigRepository,
    pub meetings: SqlAlertMeetingRepository,
    /// `None` when no calendar provider is configured; meetings are still stored.
    pub calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
}

impl ChainsyncState {
    pub fn new(
        config: Arc<AppConfig>,
        db_client: DbClient,
        calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    ) -> Self {
        let list_limit = config
            .chainsync
            .as_ref()
            .and_then(|c| c.meeting_list_limit)
            .unwrap_or(slotify_db::repositories::alert_meeting::DEFAULT_LIST_LIMIT);

        Self {
            authorities: AuthorityRepositoryFactory::new().create_repository(db_client.clone()),
            alert_configs: AlertConfigRepositoryFactory::new()
                .create_repository(db_client.clone()),
            meetings: AlertMeetingRepositoryFactory::new()
                .create_repository(db_client.clone())
                .with_default_limit(list_limit),
            config,
            db_client,
            calendar_service,
        }
    }

    /// Create the ChainSync tables.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        self.authorities.init_schema().await?;
        self.alert_configs.init_schema().await?;
        self.meetings.init_schema().await?;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        is_chainsync_enabled(&self.config)
    }

    fn ensure_enabled(&self) -> Result<(), SlotifyError> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(ChainsyncError::Disabled.into())
        }
    }
}

fn respond<T>(status: StatusCode, body: ApiResponse<T>) -> HandlerResult<T> {
    Ok((status, Json(body)))
}

/// Schedule an emergency meeting for an incoming alert.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/schedule-meeting",
    request_body = ScheduleMeetingRequest,
    responses(
        (status = 201, description = "Meeting scheduled", body = ScheduleOutcome),
        (status = 200, description = "Severity does not auto-schedule", body = ScheduleOutcome),
        (status = 400, description = "Missing field or unknown severity"),
        (status = 404, description = "No responsible authorities"),
        (status = 503, description = "ChainSync disabled")
    ),
    tag = "ChainSync"
))]
pub async fn schedule_meeting_handler(
    State(state): State<Arc<ChainsyncState>>,
    payload: Result<Json<ScheduleMeetingRequest>, JsonRejection>,
) -> HandlerResult<ScheduleOutcome> {
    state.ensure_enabled()?;
    let Json(request) = payload?;

    let outcome = logic::schedule_alert_meeting(&state, request, Utc::now()).await?;
    let (status, message) = match &outcome {
        ScheduleOutcome::NotificationOnly { .. } => (
            StatusCode::OK,
            "Alert logged; severity does not trigger a meeting".to_string(),
        ),
        ScheduleOutcome::MeetingScheduled { meeting } => (
            StatusCode::CREATED,
            format!(
                "Emergency meeting scheduled with {} attendees",
                meeting.attendees.len()
            ),
        ),
    };
    respond(status, ApiResponse::ok(outcome).with_message(message))
}

/// Meetings scheduled for one alert, newest first.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/meetings/{id}",
    params(("id" = String, Path, description = "External alert id")),
    responses(
        (status = 200, description = "Meetings for the alert", body = Vec<AlertMeeting>)
    ),
    tag = "ChainSync"
))]
pub async fn meetings_for_alert_handler(
    State(state): State<Arc<ChainsyncState>>,
    alert_id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Vec<AlertMeeting>> {
    state.ensure_enabled()?;
    let Path(alert_id) = alert_id?;

    let meetings = logic::list_meetings_for_alert(&state, &alert_id).await?;
    respond(StatusCode::OK, ApiResponse::ok(meetings))
}

/// Filtered meeting list, newest first.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/meetings",
    params(MeetingListQuery),
    responses(
        (status = 200, description = "Meetings", body = Vec<AlertMeeting>),
        (status = 400, description = "Unknown status or severity")
    ),
    tag = "ChainSync"
))]
pub async fn list_meetings_handler(
    State(state): State<Arc<ChainsyncState>>,
    query: Result<Query<MeetingListQuery>, QueryRejection>,
) -> HandlerResult<Vec<AlertMeeting>> {
    state.ensure_enabled()?;
    let Query(query) = query?;

    let meetings = logic::list_meetings(&state, &query).await?;
    respond(StatusCode::OK, ApiResponse::ok(meetings))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/meetings/{id}/status",
    params(("id" = String, Path, description = "Meeting id (uuid)")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated meeting", body = AlertMeeting),
        (status = 400, description = "Invalid status or id"),
        (status = 404, description = "Meeting not found")
    ),
    tag = "ChainSync"
))]
pub async fn update_status_handler(
    State(state): State<Arc<ChainsyncState>>,
    meeting_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> HandlerResult<AlertMeeting> {
    state.ensure_enabled()?;
    let Path(meeting_id) = meeting_id?;
    let Json(request) = payload?;

    let meeting = logic::update_meeting_status(&state, &meeting_id, request, Utc::now()).await?;
    let message = format!("Meeting status updated to {}", meeting.status);
    respond(StatusCode::OK, ApiResponse::ok(meeting).with_message(message))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/meetings/{id}/notes",
    params(("id" = String, Path, description = "Meeting id (uuid)")),
    request_body = AddNoteRequest,
    responses(
        (status = 200, description = "Meeting with the note appended", body = AlertMeeting),
        (status = 400, description = "Empty note"),
        (status = 404, description = "Meeting not found")
    ),
    tag = "ChainSync"
))]
pub async fn add_note_handler(
    State(state): State<Arc<ChainsyncState>>,
    meeting_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<AddNoteRequest>, JsonRejection>,
) -> HandlerResult<AlertMeeting> {
    state.ensure_enabled()?;
    let Path(meeting_id) = meeting_id?;
    let Json(request) = payload?;

    let meeting = logic::add_meeting_note(&state, &meeting_id, request, Utc::now()).await?;
    respond(StatusCode::OK, ApiResponse::ok(meeting).with_message("Note added"))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/authorities",
    request_body = AuthorityRequest,
    responses(
        (status = 200, description = "Stored authority", body = Authority),
        (status = 400, description = "Missing required field")
    ),
    tag = "ChainSync"
))]
pub async fn upsert_authority_handler(
    State(state): State<Arc<ChainsyncState>>,
    payload: Result<Json<AuthorityRequest>, JsonRejection>,
) -> HandlerResult<Authority> {
    state.ensure_enabled()?;
    let Json(request) = payload?;

    let authority = logic::upsert_authority(&state, request, Utc::now()).await?;
    info!("Authority {} saved", authority.email);
    respond(StatusCode::OK, ApiResponse::ok(authority).with_message("Authority saved"))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/authorities",
    params(AuthorityListQuery),
    responses(
        (status = 200, description = "Authorities by priority", body = Vec<Authority>)
    ),
    tag = "ChainSync"
))]
pub async fn list_authorities_handler(
    State(state): State<Arc<ChainsyncState>>,
    query: Result<Query<AuthorityListQuery>, QueryRejection>,
) -> HandlerResult<Vec<Authority>> {
    state.ensure_enabled()?;
    let Query(query) = query?;

    let authorities = logic::list_authorities(&state, &query).await?;
    respond(StatusCode::OK, ApiResponse::ok(authorities))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/authorities/{email}",
    params(("email" = String, Path, description = "Authority email")),
    responses(
        (status = 200, description = "Authority deactivated"),
        (status = 404, description = "Unknown authority")
    ),
    tag = "ChainSync"
))]
pub async fn deactivate_authority_handler(
    State(state): State<Arc<ChainsyncState>>,
    email: Result<Path<String>, PathRejection>,
) -> HandlerResult<()> {
    state.ensure_enabled()?;
    let Path(email) = email?;

    logic::deactivate_authority(&state, &email).await?;
    respond(
        StatusCode::OK,
        ApiResponse {
            success: true,
            message: Some(format!("Authority {} deactivated", email)),
            data: None,
            error: None,
            details: None,
        },
    )
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/config",
    request_body = AlertConfigRequest,
    responses(
        (status = 200, description = "Stored policy", body = AlertConfig),
        (status = 400, description = "Missing alert type or invalid duration")
    ),
    tag = "ChainSync"
))]
pub async fn upsert_config_handler(
    State(state): State<Arc<ChainsyncState>>,
    payload: Result<Json<AlertConfigRequest>, JsonRejection>,
) -> HandlerResult<AlertConfig> {
    state.ensure_enabled()?;
    let Json(request) = payload?;

    let config = logic::upsert_alert_config(&state, request, Utc::now()).await?;
    respond(StatusCode::OK, ApiResponse::ok(config).with_message("Alert policy saved"))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/config",
    responses(
        (status = 200, description = "All stored policies", body = Vec<AlertConfig>)
    ),
    tag = "ChainSync"
))]
pub async fn list_configs_handler(
    State(state): State<Arc<ChainsyncState>>,
) -> HandlerResult<Vec<AlertConfig>> {
    state.ensure_enabled()?;

    let configs = logic::list_alert_configs(&state).await?;
    respond(StatusCode::OK, ApiResponse::ok(configs))
}

/// Reports database reachability; answers even when ChainSync is disabled.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = HealthStatus)
    ),
    tag = "ChainSync"
))]
pub async fn health_handler(State(state): State<Arc<ChainsyncState>>) -> HandlerResult<HealthStatus> {
    health_response(logic::health(&state).await)
}

/// 503 with `success: false` while the database is unreachable; the
/// component report is still returned.
pub(crate) fn health_response(health: HealthStatus) -> HandlerResult<HealthStatus> {
    if health.database {
        return respond(StatusCode::OK, ApiResponse::ok(health));
    }
    let mut body = ApiResponse::ok(health);
    body.success = false;
    body.error = Some("Database unreachable".to_string());
    respond(StatusCode::SERVICE_UNAVAILABLE, body)
}
