// ABOUTME: Shared application state for the shutterd HTTP server.
// ABOUTME: Holds the capture manager and both logs behind mutexes for cross-request serialization.

use std::path::Path;
use std::sync::Arc;

use shutterd_capture::{CaptureManager, FrameSource};
use shutterd_store::{EventLog, SystemLog};
use tokio::sync::Mutex;

/// Shared application state accessible by all Axum handlers.
///
/// Each component sits behind its own mutex: the camera device tolerates only
/// one open handle at a time, and the event log's read-modify-write is not
/// atomic, so two concurrent appends would drop one update. The core itself
/// implements no locking; this is the serialization the core's contract
/// requires of its caller.
pub struct AppState {
    pub capture: Mutex<CaptureManager>,
    pub events: Mutex<EventLog>,
    pub system: Mutex<SystemLog>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create state rooted at `home`, with the standard layout:
    /// `<home>/image-captures/` for frames and `<home>/logs/` for both logs.
    pub fn new(home: &Path, source: impl FrameSource + 'static) -> Self {
        let logs_dir = home.join("logs");
        Self {
            capture: Mutex::new(CaptureManager::new(home.join("image-captures"), source)),
            events: Mutex::new(EventLog::new(logs_dir.join("events.json"))),
            system: Mutex::new(SystemLog::new(logs_dir.join("system.log"))),
        }
    }
}
