//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Human readable status line.
    pub message: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Provider credential presence.
    pub imagekit: ImageKitStatus,
}

/// `"Set"` or `"Missing"` for each provider credential.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageKitStatus {
    /// Public key presence.
    pub public_key: &'static str,
    /// Private key presence.
    pub private_key: &'static str,
    /// URL endpoint presence.
    pub url_endpoint: &'static str,
}

fn presence(set: bool) -> &'static str {
    if set { "Set" } else { "Missing" }
}

/// Health check handler. Never calls the provider.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "FileSync server is running",
        version: env!("CARGO_PKG_VERSION"),
        imagekit: ImageKitStatus {
            public_key: presence(state.credentials.public_key),
            private_key: presence(state.credentials.private_key),
            url_endpoint: presence(state.credentials.url_endpoint),
        },
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use crate::test_utils::{MockProvider, body_json, test_state};
    use axum::{body::Body, http::Request, http::StatusCode};
    use filesync_shared::CredentialStatus;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_credentials() {
        let provider = Arc::new(MockProvider::new());
        let mut state = test_state(&provider);
        state.credentials = CredentialStatus {
            public_key: true,
            private_key: false,
            url_endpoint: true,
        };

        let response = create_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "FileSync server is running");
        assert_eq!(
            body["imagekit"],
            json!({"publicKey": "Set", "privateKey": "Missing", "urlEndpoint": "Set"})
        );
        assert!(provider.calls().is_empty());
    }

    #[test]
    fn test_presence() {
        assert_eq!(presence(true), "Set");
        assert_eq!(presence(false), "Missing");
    }
}
