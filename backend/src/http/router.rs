//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Capacity
        .route("/capacity", get(handlers::get_capacity))
        .route("/capacity/adjust", put(handlers::adjust_capacity))
        .route("/admin/capacity", post(handlers::set_capacity))
        // Shift selection
        .route("/shifts/select", post(handlers::select_shifts))
        .route("/shifts/{employee_id}", get(handlers::get_employee_shifts))
        .route("/shifts/{employee_id}", delete(handlers::reset_schedule))
        // Vacation overlay
        .route("/vacation/request", post(handlers::request_vacation))
        .route("/vacation/{employee_id}", get(handlers::get_vacation))
        .route("/vacation/{employee_id}", delete(handlers::reset_vacation))
        // Export
        .route("/export/schedule", get(handlers::export_schedule));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::AllocationPolicy;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new())
            as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo, AllocationPolicy::exact_epoch());
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
