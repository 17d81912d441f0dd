//! Unmatched routes and panic recovery.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use filesync_shared::AppError;

use crate::error::ApiError;

/// Any path or method without a route.
pub async fn route_not_found() -> ApiError {
    AppError::NotFound("Route not found".into()).into()
}

/// Turns a handler panic into a 500 carrying the panic message.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic message".to_string()
    };

    ApiError(AppError::internal("Internal server error", details)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use crate::test_utils::{MockProvider, body_json, test_state};
    use axum::{body::Body, http::Request, http::StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[rstest]
    #[case("GET", "/foo/bar")]
    #[case("POST", "/foo/bar")]
    #[case("DELETE", "/")]
    #[case("PUT", "/api")]
    #[case("GET", "/api/upload")]
    #[case("POST", "/health")]
    #[case("PATCH", "/api/file/abc")]
    #[tokio::test]
    async fn test_unknown_route_returns_404(#[case] method: &str, #[case] uri: &str) {
        let provider = Arc::new(MockProvider::new());
        let response = create_router(test_state(&provider))
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Route not found"}));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_panic_becomes_500_with_message() {
        let provider = Arc::new(MockProvider::panicking("provider exploded"));
        let response = create_router(test_state(&provider))
            .oneshot(
                Request::builder()
                    .uri("/api/file/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Internal server error", "details": "provider exploded"})
        );
    }

    #[test]
    fn test_handle_panic_static_str() {
        let response = handle_panic(Box::new("static message"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
