// ABOUTME: Clear endpoints for the images directory, event log, and operational log.
// ABOUTME: Each handler resets its target and mirrors the outcome as a LOG or ERR line.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::app_state::SharedState;

/// DELETE /image-captures - Empty and recreate the images directory.
pub async fn clear_image_captures(State(state): State<SharedState>) -> impl IntoResponse {
    let result = {
        let manager = state.capture.lock().await;
        manager.clear_images_dir().map_err(|err| err.to_string())
    };

    finish(
        &state,
        result,
        "Successful clearing of images directory",
        "Failed to clear images directory",
    )
    .await
}

/// DELETE /events-log - Reset the event log to the empty template.
pub async fn clear_events_log(State(state): State<SharedState>) -> impl IntoResponse {
    let result = {
        let events = state.events.lock().await;
        events.clear().map_err(|err| err.to_string())
    };

    finish(
        &state,
        result,
        "Successful clearing of events log",
        "Failed to clear events log",
    )
    .await
}

/// DELETE /systems-log - Truncate the operational log.
///
/// The success line lands in the log that was just cleared, so a cleared
/// operational log always starts with its own clearing record.
pub async fn clear_systems_log(State(state): State<SharedState>) -> impl IntoResponse {
    let result = {
        let system = state.system.lock().await;
        system.clear().map_err(|err| err.to_string())
    };

    finish(
        &state,
        result,
        "Successful clearing of systems log",
        "Failed to clear systems log",
    )
    .await
}

/// Mirror the outcome into the operational log and build the response: 200
/// on success, 500 on failure. A failed success-mirror is itself a server
/// error; a failed failure-mirror is logged and the original error returned.
async fn finish(
    state: &SharedState,
    result: Result<(), String>,
    success_message: &str,
    failure_context: &str,
) -> Response {
    match result {
        Ok(()) => {
            if let Err(err) = state.system.lock().await.append(success_message, false) {
                tracing::error!(error = %err, "failed to write operational log");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "success": false, "error": err.to_string() })),
                )
                    .into_response();
            }
            (StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response()
        }
        Err(err) => {
            let line = format!("{failure_context}: {err}");
            if let Err(log_err) = state.system.lock().await.append(&line, true) {
                tracing::error!(error = %log_err, "failed to write operational log");
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "success": false, "error": err })),
            )
                .into_response()
        }
    }
}
