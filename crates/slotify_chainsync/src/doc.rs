// File: crates/slotify_chainsync/src/doc.rs

#![allow(dead_code)]
use utoipa::OpenApi;

use crate::logic::{
    AddNoteRequest, AlertConfigRequest, AuthorityRequest, CalendarLinkRequest, HealthStatus,
    JurisdictionRequest, PartialAlertPolicy, ScheduleMeetingRequest, ScheduleOutcome,
    UpdateStatusRequest,
};
use slotify_common::models::{
    AlertConfig, AlertDetails, AlertMeeting, AlertPolicy, Attendee, AttendeeStatus, Authority,
    GoogleCalendarLink, Jurisdiction, Location, MeetingNote, MeetingStatus, MeetingWindow,
    Severity, SeverityPolicy,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::schedule_meeting_handler,
        crate::handlers::meetings_for_alert_handler,
        crate::handlers::list_meetings_handler,
        crate::handlers::update_status_handler,
        crate::handlers::add_note_handler,
        crate::handlers::upsert_authority_handler,
        crate::handlers::list_authorities_handler,
        crate::handlers::deactivate_authority_handler,
        crate::handlers::upsert_config_handler,
        crate::handlers::list_configs_handler,
        crate::handlers::health_handler,
    ),
    components(
        schemas(
            ScheduleMeetingRequest,
            ScheduleOutcome,
            UpdateStatusRequest,
            AddNoteRequest,
            AuthorityRequest,
            JurisdictionRequest,
            CalendarLinkRequest,
            AlertConfigRequest,
            PartialAlertPolicy,
            HealthStatus,
            AlertMeeting,
            AlertDetails,
            Location,
            MeetingWindow,
            Attendee,
            AttendeeStatus,
            MeetingStatus,
            MeetingNote,
            Authority,
            Jurisdiction,
            GoogleCalendarLink,
            AlertConfig,
            AlertPolicy,
            SeverityPolicy,
            Severity,
        )
    ),
    tags(
        (name = "ChainSync", description = "Alert-driven emergency meeting scheduling")
    ),
    servers(
        (url = "/api/chainsync", description = "ChainSync API server")
    )
)]
pub struct ChainsyncApiDoc;
