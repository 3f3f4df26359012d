//! HTTP route definitions

use axum::routing::post;
use axum::Router;

use super::handlers;
use super::server::AppState;

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::notify::notify))
        .with_state(state)
}
