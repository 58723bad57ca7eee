use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::error::{HttpStatusCode, SlotifyError};

static EXPOSE_ERROR_DETAILS: OnceCell<bool> = OnceCell::new();

/// Decide once whether 5xx responses carry a `details` field.
///
/// Called at startup with the configured environment; unset means exposed.
pub fn configure_error_details(production: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(!production);
}

fn expose_error_details() -> bool {
    *EXPOSE_ERROR_DETAILS.get().unwrap_or(&true)
}

/// JSON envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
            details,
        }
    }
}

/// Extension trait for SlotifyError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for SlotifyError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let details = if status_code.is_server_error() && expose_error_details() {
            Some(self.to_string())
        } else {
            None
        };

        if status_code.is_server_error() {
            tracing::error!("Request failed with {}: {}", status_code, self);
        }

        let body = Json(ApiResponse::failure(self.public_message(), details));
        (status_code, body).into_response()
    }
}

impl IntoResponse for SlotifyError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

// Extractor rejections become 400s in the common envelope instead of axum's plain-text 422.
impl From<JsonRejection> for SlotifyError {
    fn from(rejection: JsonRejection) -> Self {
        SlotifyError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for SlotifyError {
    fn from(rejection: QueryRejection) -> Self {
        SlotifyError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for SlotifyError {
    fn from(rejection: PathRejection) -> Self {
        SlotifyError::ValidationError(rejection.body_text())
    }
}

/// Renders a panic caught by `tower_http::catch_panic::CatchPanicLayer`.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    SlotifyError::InternalError(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn client_error_envelope() {
        let response = SlotifyError::ValidationError("severity is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "severity is required");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn server_error_hides_message_but_keeps_details_outside_production() {
        let response = SlotifyError::DatabaseError("disk I/O error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["details"], "Database error: disk I/O error");
    }

    #[tokio::test]
    async fn panic_is_rendered_as_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn ok_envelope_serializes_without_empty_fields() {
        let json =
            serde_json::to_value(ApiResponse::ok(vec![1, 2]).with_message("two items")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "two items");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("error").is_none());
    }
}
