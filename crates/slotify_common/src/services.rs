//! Service abstractions for external services.
//!
//! The scheduling logic only sees these traits, so tests can swap the
//! Google Calendar provider for an in-process double.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Per-organizer OAuth material for a calendar write.
#[derive(Clone, Default)]
pub struct CalendarCredentials {
    pub calendar_id: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

// Tokens stay out of logs.
impl fmt::Debug for CalendarCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarCredentials")
            .field("calendar_id", &self.calendar_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// A trait for calendar service operations.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create an event on the organizer's calendar, inviting the attendees.
    fn create_event(
        &self,
        credentials: &CalendarCredentials,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// A factory for creating service instances.
pub trait ServiceFactory: Send + Sync {
    /// Get a calendar service instance, `None` when the provider is disabled.
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>>;
}

/// An invitee on a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
    pub display_name: Option<String>,
}

/// Data structures for calendar service operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// The summary or title of the event.
    pub summary: String,
    pub description: Option<String>,
    pub attendees: Vec<EventAttendee>,
    /// Request a video conference with the event.
    pub with_conference: bool,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
    /// Join link of the attached conference, if one was created.
    pub meet_link: Option<String>,
    pub html_link: Option<String>,
}
