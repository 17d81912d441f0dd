//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod fallback;
pub mod files;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(files::routes(state.max_file_size))
}
