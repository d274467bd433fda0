// ABOUTME: Defines the capture event record and the timestamp format shared by capture and store.
// ABOUTME: Events represent immutable facts about a completed camera capture.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Event type emitted for every still-image capture. The event log schema
/// stays open to other kinds; this component only ever produces this one.
pub const CAMERA_CAPTURE: &str = "Camera Capture";

/// A structured record describing one completed capture. The timestamp
/// doubles as the image's base filename, so within a single device it is
/// unique at second granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    pub timestamp: String,
    pub event_type: String,
    pub image_filename: String,
}

impl CaptureEvent {
    /// Build a camera-capture event from a capture timestamp. The image
    /// filename is derived, never supplied independently.
    pub fn camera_capture(timestamp: String) -> Self {
        let image_filename = format!("{timestamp}.png");
        Self {
            timestamp,
            event_type: CAMERA_CAPTURE.to_string(),
            image_filename,
        }
    }

    /// Serialize into the loose record shape the event log stores.
    pub fn to_record(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp,
            "event_type": self.event_type,
            "image_filename": self.image_filename,
        })
    }
}

/// Current local time in the `YYYY_MM_DD__HH_MM_SS` capture format.
pub fn capture_timestamp() -> String {
    Local::now().format("%Y_%m_%d__%H_%M_%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_round_trip() {
        let event = CaptureEvent::camera_capture("2024_01_01__00_00_00".to_string());
        let json = serde_json::to_string(&event).expect("serialize event");
        let deser: CaptureEvent = serde_json::from_str(&json).expect("deserialize event");
        assert_eq!(event, deser);
    }

    #[test]
    fn camera_capture_derives_filename() {
        let event = CaptureEvent::camera_capture("2024_01_01__00_00_00".to_string());
        assert_eq!(event.timestamp, "2024_01_01__00_00_00");
        assert_eq!(event.event_type, "Camera Capture");
        assert_eq!(event.image_filename, "2024_01_01__00_00_00.png");
    }

    #[test]
    fn record_carries_exact_field_names() {
        let record = CaptureEvent::camera_capture("2024_06_15__12_30_45".to_string()).to_record();
        assert_eq!(record["timestamp"], "2024_06_15__12_30_45");
        assert_eq!(record["event_type"], "Camera Capture");
        assert_eq!(record["image_filename"], "2024_06_15__12_30_45.png");
    }

    #[test]
    fn capture_timestamp_matches_format() {
        let ts = capture_timestamp();
        // YYYY_MM_DD__HH_MM_SS is fixed-width: 4+1+2+1+2+2+2+1+2+1+2 = 20
        assert_eq!(ts.len(), 20);
        assert_eq!(&ts[4..5], "_");
        assert_eq!(&ts[10..12], "__");
        assert!(ts.chars().all(|c| c.is_ascii_digit() || c == '_'));
    }
}
