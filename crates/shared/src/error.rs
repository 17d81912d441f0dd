//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Each variant carries the short, client-facing message; the server-side
/// variants also carry the underlying detail string.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid client input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body exceeds the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Resource or route not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The storage provider failed or answered with unusable data.
    #[error("External service error: {message}: {details}")]
    ExternalService {
        /// Short message.
        message: String,
        /// Underlying failure.
        details: String,
    },

    /// Internal server error.
    #[error("Internal error: {message}: {details}")]
    Internal {
        /// Short message.
        message: String,
        /// Underlying failure.
        details: String,
    },
}

impl AppError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an external service error.
    #[must_use]
    pub fn external_service(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::ExternalService { .. } | Self::Internal { .. } => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// The short message shown to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::PayloadTooLarge(msg) | Self::NotFound(msg) => msg,
            Self::ExternalService { message, .. } | Self::Internal { message, .. } => message,
        }
    }

    /// The underlying detail, for server-side failures.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::ExternalService { details, .. } | Self::Internal { details, .. } => {
                Some(details)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
