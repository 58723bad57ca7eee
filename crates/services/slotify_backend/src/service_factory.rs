// --- File: crates/services/slotify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the external providers enabled by cargo features and runtime flags
//! and hands them out behind the object-safe traits from `slotify_common`.
use slotify_common::services::{BoxedError, CalendarService, ServiceFactory};
use slotify_config::AppConfig;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "gcal")]
use {
    slotify_common::is_gcal_enabled,
    slotify_common::services::{
        BoxFuture, CalendarCredentials, CalendarEvent, CalendarEventResult,
    },
    slotify_gcal::GoogleCalendarService,
};

/// Erases `GcalServiceError` so the provider fits `CalendarService<Error = BoxedError>`.
#[cfg(feature = "gcal")]
struct BoxedCalendarService {
    inner: GoogleCalendarService,
}

#[cfg(feature = "gcal")]
impl CalendarService for BoxedCalendarService {
    type Error = BoxedError;

    fn create_event(
        &self,
        credentials: &CalendarCredentials,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let credentials = credentials.clone();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_event(&credentials, event)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Service factory implementation for the backend.
pub struct SlotifyServiceFactory {
    calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
}

impl SlotifyServiceFactory {
    /// Create a new service factory.
    ///
    /// Providers hold no connections up front; Google Calendar hubs are built
    /// per organizer when an event is created.
    #[cfg_attr(not(feature = "gcal"), allow(unused_variables))]
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>> = None;

        #[cfg(feature = "gcal")]
        if let (true, Some(gcal_config)) = (is_gcal_enabled(&config), config.gcal.as_ref()) {
            info!("Initializing Google Calendar provider");
            calendar_service = Some(Arc::new(BoxedCalendarService {
                inner: GoogleCalendarService::new(gcal_config.clone()),
            }));
        }

        if calendar_service.is_none() {
            info!("No calendar provider configured; meetings are stored without events");
        }

        Self { calendar_service }
    }

    /// Factory with an explicit provider, used by tests.
    pub fn with_calendar_service(
        calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    ) -> Self {
        Self { calendar_service }
    }
}

impl ServiceFactory for SlotifyServiceFactory {
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        self.calendar_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotify_config::GcalConfig;

    #[test]
    fn no_provider_without_gcal_section() {
        let config = Arc::new(AppConfig {
            use_gcal: true,
            ..Default::default()
        });
        assert!(SlotifyServiceFactory::new(config).calendar_service().is_none());
    }

    #[cfg(feature = "gcal")]
    #[test]
    fn gcal_provider_when_enabled() {
        let config = Arc::new(AppConfig {
            use_gcal: true,
            gcal: Some(GcalConfig::default()),
            ..Default::default()
        });
        assert!(SlotifyServiceFactory::new(config).calendar_service().is_some());
    }

    #[test]
    fn flag_off_disables_provider() {
        let config = Arc::new(AppConfig {
            use_gcal: false,
            gcal: Some(GcalConfig::default()),
            ..Default::default()
        });
        assert!(SlotifyServiceFactory::new(config).calendar_service().is_none());
    }
}
