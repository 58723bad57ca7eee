use slotify_common::SlotifyError;
use thiserror::Error;

pub const SERVICE_NAME: &str = "google_calendar";

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Authentication setup failed: {0}")]
    AuthError(String),
    #[error("Missing calendar credentials: {0}")]
    MissingCredentials(String),
    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

impl From<std::io::Error> for GcalServiceError {
    fn from(err: std::io::Error) -> Self {
        GcalServiceError::AuthError(err.to_string())
    }
}

impl From<GcalServiceError> for SlotifyError {
    fn from(err: GcalServiceError) -> Self {
        SlotifyError::ExternalServiceError {
            service_name: SERVICE_NAME.to_string(),
            message: err.to_string(),
        }
    }
}
