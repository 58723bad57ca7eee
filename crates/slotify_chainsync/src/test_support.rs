//! Shared fixtures for the unit tests.

use crate::handlers::ChainsyncState;
use crate::logic::{AuthorityRequest, CalendarLinkRequest, JurisdictionRequest};
use slotify_common::services::{
    BoxFuture, BoxedError, CalendarCredentials, CalendarEvent, CalendarEventResult,
    CalendarService,
};
use slotify_config::{AppConfig, DatabaseConfig};
use slotify_db::DbClient;
use std::sync::{Arc, Mutex};

pub const MEET_LINK: &str = "https://meet.google.com/abc-defg-hij";

/// In-process calendar provider that records calls and can simulate outages.
#[derive(Default)]
pub struct MockCalendar {
    pub fail: bool,
    pub calls: Mutex<Vec<(CalendarCredentials, CalendarEvent)>>,
}

impl MockCalendar {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CalendarService for MockCalendar {
    type Error = BoxedError;

    fn create_event(
        &self,
        credentials: &CalendarCredentials,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((credentials.clone(), event));
        let fail = self.fail;

        Box::pin(async move {
            if fail {
                Err(BoxedError("calendar quota exceeded".into()))
            } else {
                Ok(CalendarEventResult {
                    event_id: Some("evt-123".to_string()),
                    status: "confirmed".to_string(),
                    meet_link: Some(MEET_LINK.to_string()),
                    html_link: None,
                })
            }
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        use_chainsync: true,
        database: Some(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
        }),
        ..Default::default()
    }
}

pub async fn state_with(
    config: AppConfig,
    calendar: Option<Arc<MockCalendar>>,
) -> Arc<ChainsyncState> {
    let db_client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let calendar = calendar.map(|c| c as Arc<dyn CalendarService<Error = BoxedError>>);
    let state = ChainsyncState::new(Arc::new(config), db_client, calendar);
    state.init_schema().await.unwrap();
    Arc::new(state)
}

pub async fn test_state(calendar: Option<Arc<MockCalendar>>) -> Arc<ChainsyncState> {
    state_with(test_config(), calendar).await
}

pub fn authority_request(name: &str, email: &str, department: &str) -> AuthorityRequest {
    AuthorityRequest {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        phone: None,
        role: Some("Duty Officer".to_string()),
        department: Some(department.to_string()),
        jurisdiction: Some(JurisdictionRequest {
            region: Some("north".to_string()),
            sub_regions: vec![],
        }),
        alert_types: vec![],
        priority: None,
        google_calendar: None,
    }
}

pub fn with_calendar(mut request: AuthorityRequest, token: &str) -> AuthorityRequest {
    request.google_calendar = Some(CalendarLinkRequest {
        calendar_id: None,
        access_token: Some(token.to_string()),
        refresh_token: None,
    });
    request
}
