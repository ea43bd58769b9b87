// src/api/http/router.rs
// HTTP router composition

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    diagnostics_handler, feed_handler, fallback_handler, health_handler, phrase_handler,
    root_handler,
};
use crate::state::AppState;

/// Public routes with CORS open to every origin
pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/phrase", get(phrase_handler))
        .route("/api/diagnostics", get(diagnostics_handler))
        .route("/rss", get(feed_handler))
        .fallback(fallback_handler)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
