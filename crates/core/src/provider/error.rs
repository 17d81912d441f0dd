//! Provider error types.

use thiserror::Error;

/// Failures talking to the storage provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The provider rejected the credentials.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The provider refused the request because of rate or quota limits.
    #[error("rate limit or quota exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success response.
    #[error("provider returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider message, or the status reason.
        message: String,
    },

    /// A success response that could not be decoded.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The client could not be constructed.
    #[error("provider configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
