use std::fmt;
use thiserror::Error;

/// The base error type for all Slotify errors.
///
/// Each crate keeps its own error enum and implements `From<CrateError> for SlotifyError`.
#[derive(Error, Debug)]
pub enum SlotifyError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The feature serving the request is switched off
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SlotifyError {
    fn status_code(&self) -> u16 {
        match self {
            SlotifyError::ParseError(_) => 400,
            SlotifyError::ConfigError(_) => 500,
            SlotifyError::ValidationError(_) => 400,
            SlotifyError::DatabaseError(_) => 500,
            SlotifyError::ExternalServiceError { .. } => 502,
            SlotifyError::ConflictError(_) => 409,
            SlotifyError::NotFoundError(_) => 404,
            SlotifyError::ServiceUnavailable(_) => 503,
            SlotifyError::InternalError(_) => 500,
        }
    }
}

impl SlotifyError {
    /// Message safe to show to API clients.
    ///
    /// Client errors carry their own message; server errors are replaced by a
    /// generic text so that internals only surface through `details`.
    pub fn public_message(&self) -> String {
        match self {
            SlotifyError::ParseError(msg)
            | SlotifyError::ValidationError(msg)
            | SlotifyError::ConflictError(msg)
            | SlotifyError::NotFoundError(msg)
            | SlotifyError::ServiceUnavailable(msg) => msg.clone(),
            SlotifyError::ExternalServiceError { service_name, .. } => {
                format!("{} request failed", service_name)
            }
            SlotifyError::ConfigError(_)
            | SlotifyError::DatabaseError(_)
            | SlotifyError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, SlotifyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, SlotifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, SlotifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| SlotifyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, SlotifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| SlotifyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<serde_json::Error> for SlotifyError {
    fn from(err: serde_json::Error) -> Self {
        SlotifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SlotifyError {
    fn from(err: std::io::Error) -> Self {
        SlotifyError::InternalError(err.to_string())
    }
}

impl From<slotify_config::UnknownSeverity> for SlotifyError {
    fn from(err: slotify_config::UnknownSeverity) -> Self {
        SlotifyError::ValidationError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SlotifyError {
    SlotifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(validation_error("x").status_code(), 400);
        assert_eq!(not_found("x").status_code(), 404);
        assert_eq!(conflict("x").status_code(), 409);
        assert_eq!(internal_error("x").status_code(), 500);
        assert_eq!(external_service_error("gcal", "x").status_code(), 502);
        assert_eq!(
            SlotifyError::ServiceUnavailable("off".into()).status_code(),
            503
        );
    }

    #[test]
    fn server_errors_hide_their_message() {
        assert_eq!(
            internal_error("db password wrong").public_message(),
            "Internal server error"
        );
        assert_eq!(validation_error("alertId is required").public_message(), "alertId is required");
    }

    #[test]
    fn context_wraps_as_internal() {
        let res: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err = res.context("writing log").unwrap_err();
        assert!(matches!(err, SlotifyError::InternalError(ref m) if m == "writing log: disk full"));
    }

    #[test]
    fn unknown_severity_is_validation() {
        let err: SlotifyError = "severe"
            .parse::<slotify_config::Severity>()
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), 400);
    }
}
