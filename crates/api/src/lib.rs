//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for upload, delete, lookup and health
//! - The multipart upload extractor
//! - JSON error responses, route fallback and panic recovery

pub mod error;
pub mod extractors;
pub mod routes;

#[cfg(test)]
mod test_utils;

use axum::Router;
use filesync_core::files::FileService;
use filesync_shared::CredentialStatus;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
///
/// Built once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct AppState {
    /// File relay service.
    pub files: FileService,
    /// Provider credential presence, reported by `/health`.
    pub credentials: CredentialStatus,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes(&state))
        .fallback(routes::fallback::route_not_found)
        .method_not_allowed_fallback(routes::fallback::route_not_found)
        .layer(CatchPanicLayer::custom(routes::fallback::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
