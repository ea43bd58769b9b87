// src/api/http/handlers.rs

use axum::{
    Json,
    extract::State,
    http::{Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use super::feed::render_feed;
use crate::api::error::{ApiError, ApiResult};
use crate::phrase::PhraseRecord;
use crate::phrase::selector::PeriodSnapshot;
use crate::state::AppState;

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Bienvenido a la API de Frases Diarias" }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Phrase for the current bucket as `{phrase, author}`
pub async fn phrase_handler(State(app_state): State<Arc<AppState>>) -> Json<PhraseRecord> {
    let now = app_state.clock.local();
    Json(app_state.selector.daily_phrase(&now).await)
}

/// Bucket internals for operational checks
pub async fn diagnostics_handler(State(app_state): State<Arc<AppState>>) -> Json<PeriodSnapshot> {
    let now = app_state.clock.local();
    Json(app_state.selector.snapshot(&now).await)
}

/// RSS feed holding only the current phrase
pub async fn feed_handler(State(app_state): State<Arc<AppState>>) -> ApiResult<Response> {
    let record = app_state.selector.daily_phrase(&app_state.clock.local()).await;
    let xml = render_feed(&app_state.feed, &record, app_state.clock.utc())
        .map_err(ApiError::feed_render)?;

    debug!(bytes = xml.len(), "Rendered feed");
    Ok(([(header::CONTENT_TYPE, "application/rss+xml")], xml).into_response())
}

pub async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::route_not_found(uri.path())
}
