//! Router configuration for the HTTP server.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! static file serving, and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = ServeDir::new(&state.config.static_dir);
    let favicon = ServeFile::new(&state.config.favicon);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Pages
        .route(routes::INDEX, get(handlers::index))
        .route(routes::HELP, get(handlers::help))
        .route(routes::UPLOAD_PAGE, get(handlers::upload_page))
        .route(routes::UPLOAD, post(handlers::upload))
        .route(routes::HEALTH, get(handlers::health_check))
        // Session API
        .route(routes::SESSIONS, post(handlers::create_session))
        .route(
            routes::SESSION,
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route(routes::SESSION_EVENTS, post(handlers::post_event))
        .route(
            routes::SESSION_JITTER,
            post(handlers::apply_jitter).delete(handlers::remove_jitter),
        )
        // Static assets
        .nest_service(routes::STATIC, static_dir)
        .route_service(routes::FAVICON, favicon)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
