//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use filesync_core::files::FileError;
use filesync_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// An [`AppError`] rendered as a JSON response.
///
/// Body: `{"error": <message>}`, plus `"details"` when the error carries one.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Convert a file operation error, using `context` as the message for
    /// upstream failures.
    #[must_use]
    pub fn from_file_error(err: FileError, context: &str) -> Self {
        if err.is_client_error() {
            return Self(AppError::validation(err.to_string()));
        }
        Self(AppError::external_service(context, err.to_string()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        } else {
            warn!(code = self.0.error_code(), error = %self.0, "Request rejected");
        }

        let body = match self.0.details() {
            Some(details) => json!({ "error": self.0.message(), "details": details }),
            None => json!({ "error": self.0.message() }),
        };

        (status, Json(body)).into_response()
    }
}
