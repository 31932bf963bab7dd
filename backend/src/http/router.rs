//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
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
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Session
        .route(
            "/timetables",
            put(handlers::put_timetables)
                .get(handlers::list_timetables)
                .delete(handlers::delete_timetables),
        )
        .route("/generation-result", post(handlers::post_generation_result))
        // Rendering and single downloads
        .route("/timetables/{table_id}", get(handlers::get_timetable))
        .route("/timetables/{table_id}/csv", get(handlers::get_timetable_csv))
        // Batch exports
        .route("/exports/{category}", post(handlers::start_export))
        .route("/jobs/{job_id}", get(handlers::get_job_status));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Generated datasets for a whole institute can be large.
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
