//! HTTP API route definitions.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{echo, health, metrics, not_found, ping, root, AppState};
use crate::config::Config;
use crate::metrics::track_requests;

/// Create the API router.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        // Health endpoints
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/echo", post(echo))
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .with_state(state);

    if config.docs_enabled {
        router =
            router.merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));
    }

    let router = router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
