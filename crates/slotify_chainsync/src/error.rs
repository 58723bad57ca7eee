use slotify_common::services::BoxedError;
use slotify_common::SlotifyError;
use slotify_config::UnknownSeverity;
use slotify_db::DbError;
use thiserror::Error;

/// Errors from the alert scheduling operations.
#[derive(Error, Debug)]
pub enum ChainsyncError {
    #[error("{0}")]
    Validation(String),

    #[error("No responsible authorities found for alert type '{0}'")]
    NoResponsibleAuthorities(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("ChainSync service is disabled.")]
    Disabled,

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<UnknownSeverity> for ChainsyncError {
    fn from(err: UnknownSeverity) -> Self {
        ChainsyncError::Validation(err.to_string())
    }
}

impl From<ChainsyncError> for SlotifyError {
    fn from(err: ChainsyncError) -> Self {
        match err {
            ChainsyncError::Validation(msg) => SlotifyError::ValidationError(msg),
            ChainsyncError::NoResponsibleAuthorities(_) | ChainsyncError::NotFound(_) => {
                SlotifyError::NotFoundError(err.to_string())
            }
            ChainsyncError::Disabled => SlotifyError::ServiceUnavailable(err.to_string()),
            ChainsyncError::Database(db_err) => db_err.into(),
        }
    }
}

/// Why no calendar event was attached to a meeting.
///
/// Never fails the request; the reason ends up in `calendarError`.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("calendar provider is not configured")]
    ProviderDisabled,

    #[error("no responsible authority has a connected Google Calendar")]
    NoOrganizer,

    #[error("calendar provider failed: {0}")]
    Provider(#[from] BoxedError),
}

impl From<CalendarError> for SlotifyError {
    fn from(err: CalendarError) -> Self {
        SlotifyError::ExternalServiceError {
            service_name: "calendar".to_string(),
            message: err.to_string(),
        }
    }
}
