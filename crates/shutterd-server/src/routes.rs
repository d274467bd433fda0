// ABOUTME: Route definitions for the shutterd HTTP API.
// ABOUTME: Assembles capture and clear endpoints into a single Axum Router with shared state.

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/capture", post(api::capture::capture))
        .route("/image-captures", delete(api::logs::clear_image_captures))
        .route("/events-log", delete(api::logs::clear_events_log))
        .route("/systems-log", delete(api::logs::clear_systems_log))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// JSON 404 for unknown routes, matching the envelope of every other error.
async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": format!("Not found: {uri}"),
        })),
    )
}
