// --- File: crates/slotify_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! Implements [`CalendarService`] by inserting an event on the organizer's
//! calendar with every attendee invited and, on request, a Google Meet
//! conference attached.

use chrono_tz::Tz;
use google_calendar3::api::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event,
    EventAttendee as GoogleAttendee, EventDateTime,
};
use slotify_common::services::{
    BoxFuture, CalendarCredentials, CalendarEvent, CalendarEventResult, CalendarService,
};
use slotify_config::GcalConfig;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::create_calendar_hub;
use crate::error::GcalServiceError;

const DEFAULT_TIME_ZONE: &str = "UTC";
const DEFAULT_SEND_UPDATES: &str = "all";
const MEET_SOLUTION: &str = "hangoutsMeet";

/// Google Calendar service implementation.
#[derive(Debug, Clone, Default)]
pub struct GoogleCalendarService {
    gcal_config: GcalConfig,
}

impl GoogleCalendarService {
    pub fn new(gcal_config: GcalConfig) -> Self {
        Self { gcal_config }
    }

    /// Configured event time zone, checked against the tz database.
    pub fn time_zone(&self) -> Result<String, GcalServiceError> {
        let name = self
            .gcal_config
            .time_zone
            .as_deref()
            .unwrap_or(DEFAULT_TIME_ZONE);
        name.parse::<Tz>()
            .map(|tz| tz.name().to_string())
            .map_err(|_| GcalServiceError::InvalidTimeZone(name.to_string()))
    }

    fn send_updates(&self) -> &str {
        self.gcal_config
            .send_updates
            .as_deref()
            .unwrap_or(DEFAULT_SEND_UPDATES)
    }
}

/// Translate a provider-neutral event into the Calendar API shape.
pub fn build_event(event: &CalendarEvent, time_zone: &str, request_id: &str) -> Event {
    let attendees = event
        .attendees
        .iter()
        .map(|a| GoogleAttendee {
            email: Some(a.email.clone()),
            display_name: a.display_name.clone(),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    let conference_data = event.with_conference.then(|| ConferenceData {
        create_request: Some(CreateConferenceRequest {
            request_id: Some(request_id.to_string()),
            conference_solution_key: Some(ConferenceSolutionKey {
                type_: Some(MEET_SOLUTION.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    });

    Event {
        summary: Some(event.summary.clone()),
        description: event.description.clone(),
        start: Some(EventDateTime {
            date_time: Some(event.start_time),
            time_zone: Some(time_zone.to_string()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end_time),
            time_zone: Some(time_zone.to_string()),
            ..Default::default()
        }),
        attendees: (!attendees.is_empty()).then_some(attendees),
        conference_data,
        ..Default::default()
    }
}

/// Join link of a created event: the Meet link, else the first video entry point.
pub fn meet_link(event: &Event) -> Option<String> {
    event.hangout_link.clone().or_else(|| {
        event
            .conference_data
            .as_ref()?
            .entry_points
            .as_ref()?
            .iter()
            .find(|ep| ep.entry_point_type.as_deref() == Some("video"))
            .and_then(|ep| ep.uri.clone())
    })
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Insert the event on `credentials.calendar_id`.
    ///
    /// Invitations go out according to `gcal.send_updates`. A fresh
    /// conference request id is used per call, so retries never reuse a
    /// conference.
    fn create_event(
        &self,
        credentials: &CalendarCredentials,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let credentials = credentials.clone();

        Box::pin(async move {
            // Basic validation: end time must be after start time
            if event.end_time <= event.start_time {
                return Err(GcalServiceError::CalculationError(
                    "End time must be after start time".to_string(),
                ));
            }

            let time_zone = self.time_zone()?;
            let hub = create_calendar_hub(&credentials, &self.gcal_config).await?;

            let request_id = Uuid::new_v4().to_string();
            let new_event = build_event(&event, &time_zone, &request_id);
            debug!(
                "Inserting event '{}' on calendar '{}' with {} attendees",
                event.summary,
                credentials.calendar_id,
                event.attendees.len()
            );

            let mut call = hub
                .events()
                .insert(new_event, &credentials.calendar_id)
                .send_updates(self.send_updates());
            if event.with_conference {
                call = call.conference_data_version(1);
            }
            let (_response, created_event) = call.doit().await?;

            let result = CalendarEventResult {
                meet_link: meet_link(&created_event),
                html_link: created_event.html_link.clone(),
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            };
            info!(
                "Created calendar event {:?} (meet link: {})",
                result.event_id,
                result.meet_link.is_some()
            );
            Ok(result)
        })
    }
}
