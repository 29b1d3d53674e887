use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
///
/// Static files are not part of the router; the binary mounts them as the
/// fallback service.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Expressways
        .route(
            "/api/expressways",
            get(handlers::list_expressways).post(handlers::create_expressway),
        )
        .route("/api/expressways/{id}", get(handlers::get_expressway))
        .route("/api/update-expressway", post(handlers::update_expressway))

        .with_state(state)
}
