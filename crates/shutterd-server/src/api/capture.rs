// ABOUTME: Capture endpoint handler: triggers a device capture and records the outcome.
// ABOUTME: Maps InvalidPort to 400 and every other failure to 500, mirroring all outcomes.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use shutterd_capture::CaptureError;

use crate::app_state::SharedState;

/// Query parameters for the capture endpoint.
#[derive(Debug, Deserialize)]
pub struct CaptureParams {
    pub cam_port: Option<String>,
}

/// POST /capture - Capture one frame, append the event, mirror the outcome.
///
/// The device read and both log writes happen under their mutexes, one at a
/// time; every call is synchronous with no timeout, so a blocked device read
/// holds the request until it resolves.
pub async fn capture(
    State(state): State<SharedState>,
    Query(params): Query<CaptureParams>,
) -> impl IntoResponse {
    let captured = {
        let manager = state.capture.lock().await;
        manager.capture(params.cam_port.as_deref())
    };

    let event = match captured {
        Ok(event) => event,
        Err(err) => {
            let status = match err {
                CaptureError::InvalidPort => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return capture_failed(&state, status, &err.to_string()).await;
        }
    };

    {
        let events = state.events.lock().await;
        if let Err(err) = events.append(&event.to_record()) {
            return capture_failed(&state, StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
                .await;
        }
    }

    if let Err(err) = state
        .system
        .lock()
        .await
        .append("Successful /capture call", false)
    {
        return capture_failed(&state, StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()).await;
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "event": event })),
    )
        .into_response()
}

/// Mirror a capture failure into the operational log and build the error
/// response. If the mirror write itself fails, the response reports the
/// logging failure instead.
async fn capture_failed(
    state: &SharedState,
    status: StatusCode,
    error: &str,
) -> axum::response::Response {
    let line = format!("Failed /capture call: {error}");
    if let Err(log_err) = state.system.lock().await.append(&line, true) {
        tracing::error!(error = %log_err, "failed to write operational log");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "success": false, "error": log_err.to_string() })),
        )
            .into_response();
    }

    (
        status,
        Json(serde_json::json!({ "success": false, "error": error })),
    )
        .into_response()
}
