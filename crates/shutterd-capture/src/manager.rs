// ABOUTME: Capture manager: parses the port selector, grabs one frame, persists it as PNG.
// ABOUTME: Manages the images directory lifecycle and returns the structured capture event.

use std::fs;
use std::path::{Path, PathBuf};

use shutterd_core::{CaptureEvent, capture_timestamp};
use thiserror::Error;

use crate::device::{FrameSource, FrameSourceError};

/// Errors that can occur while capturing or clearing images. `InvalidPort`
/// is the only caller-correctable failure; everything else is the device or
/// the filesystem.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("cam_port needs to be an integer")]
    InvalidPort,

    #[error("error occurred capturing the image, ensure you are targeting the correct camera port")]
    Capture(#[source] FrameSourceError),

    #[error("error occurred saving image capture to file")]
    Persist(#[source] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Owns the images directory and a frame source. One capture is one blocking
/// device read followed by one PNG write; the event is only constructed once
/// the image file is on disk.
pub struct CaptureManager {
    images_dir: PathBuf,
    source: Box<dyn FrameSource>,
}

impl CaptureManager {
    /// Create a manager writing into `images_dir`, which is created lazily
    /// on the first successful capture.
    pub fn new(images_dir: PathBuf, source: impl FrameSource + 'static) -> Self {
        Self {
            images_dir,
            source: Box::new(source),
        }
    }

    /// Returns the path of the images directory.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Capture one frame from the device named by `port_selector` (default
    /// device `0`) and persist it as `<timestamp>.png`.
    ///
    /// A selector that does not parse as an integer fails before anything
    /// touches the device or the filesystem. Negative selectors parse, then
    /// fail at device-open time like any other unreachable port.
    pub fn capture(&self, port_selector: Option<&str>) -> Result<CaptureEvent, CaptureError> {
        let port = parse_port(port_selector)?;
        let index = u32::try_from(port).map_err(|_| {
            CaptureError::Capture(FrameSourceError::Open(format!(
                "device index {port} is out of range"
            )))
        })?;

        let frame = self
            .source
            .grab_frame(index)
            .map_err(CaptureError::Capture)?;

        fs::create_dir_all(&self.images_dir)?;

        let event = CaptureEvent::camera_capture(capture_timestamp());
        let path = self.images_dir.join(&event.image_filename);
        frame.save(&path).map_err(CaptureError::Persist)?;

        tracing::info!(index, image = %path.display(), "captured frame");
        Ok(event)
    }

    /// Delete the images directory and everything in it, then recreate it
    /// empty. Idempotent: an absent directory is simply (re)created.
    pub fn clear_images_dir(&self) -> Result<(), CaptureError> {
        if self.images_dir.exists() {
            fs::remove_dir_all(&self.images_dir)?;
        }
        fs::create_dir_all(&self.images_dir)?;

        tracing::info!(dir = %self.images_dir.display(), "cleared images directory");
        Ok(())
    }
}

/// An absent selector means device `0`. Anything present must parse as an
/// integer after trimming surrounding whitespace.
fn parse_port(selector: Option<&str>) -> Result<i64, CaptureError> {
    match selector {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| CaptureError::InvalidPort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubFrameSource;
    use tempfile::TempDir;

    #[test]
    fn capture_writes_image_and_returns_event() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("image-captures");
        let manager = CaptureManager::new(images.clone(), StubFrameSource::ready());

        let event = manager.capture(None).unwrap();

        assert_eq!(event.event_type, "Camera Capture");
        assert_eq!(event.image_filename, format!("{}.png", event.timestamp));
        assert!(
            images.join(&event.image_filename).exists(),
            "event must name a file that was actually written"
        );
    }

    #[test]
    fn omitted_selector_defaults_to_device_zero() {
        let dir = TempDir::new().unwrap();
        let source = StubFrameSource::ready();
        let manager = CaptureManager::new(dir.path().join("images"), source.clone());

        manager.capture(None).unwrap();

        assert_eq!(source.grabbed_indexes(), vec![0]);
    }

    #[test]
    fn selector_parses_to_device_index() {
        let dir = TempDir::new().unwrap();
        let source = StubFrameSource::ready();
        let manager = CaptureManager::new(dir.path().join("images"), source.clone());

        manager.capture(Some("2")).unwrap();
        manager.capture(Some(" 1 ")).unwrap();

        assert_eq!(source.grabbed_indexes(), vec![2, 1]);
    }

    #[test]
    fn non_integer_selector_is_invalid_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let source = StubFrameSource::ready();
        let manager = CaptureManager::new(images.clone(), source.clone());

        let err = manager.capture(Some("abc")).unwrap_err();

        assert!(matches!(err, CaptureError::InvalidPort));
        assert_eq!(err.to_string(), "cam_port needs to be an integer");
        assert!(!images.exists(), "no filesystem writes on invalid input");
        assert!(source.grabbed_indexes().is_empty(), "device never touched");
    }

    #[test]
    fn negative_selector_fails_at_the_device_not_validation() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let manager = CaptureManager::new(images.clone(), StubFrameSource::ready());

        let err = manager.capture(Some("-3")).unwrap_err();

        assert!(matches!(err, CaptureError::Capture(_)));
        assert!(!images.exists());
    }

    #[test]
    fn unavailable_device_fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let manager = CaptureManager::new(images.clone(), StubFrameSource::unavailable());

        let err = manager.capture(None).unwrap_err();

        assert!(matches!(err, CaptureError::Capture(_)));
        assert_eq!(
            err.to_string(),
            "error occurred capturing the image, ensure you are targeting the correct camera port"
        );
        assert!(!images.exists(), "no directory for a failed capture");
    }

    #[test]
    fn clear_images_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let manager = CaptureManager::new(images.clone(), StubFrameSource::ready());
        manager.capture(None).unwrap();

        manager.clear_images_dir().unwrap();
        assert!(images.exists());
        assert_eq!(fs::read_dir(&images).unwrap().count(), 0);

        manager.clear_images_dir().unwrap();
        assert!(images.exists());
        assert_eq!(fs::read_dir(&images).unwrap().count(), 0);
    }

    #[test]
    fn clear_creates_the_directory_when_absent() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let manager = CaptureManager::new(images.clone(), StubFrameSource::ready());

        manager.clear_images_dir().unwrap();

        assert!(images.exists());
    }

    #[test]
    fn capture_after_clear_writes_into_fresh_directory() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let manager = CaptureManager::new(images.clone(), StubFrameSource::ready());

        manager.capture(None).unwrap();
        manager.clear_images_dir().unwrap();
        let event = manager.capture(None).unwrap();

        assert!(images.join(&event.image_filename).exists());
        assert_eq!(fs::read_dir(&images).unwrap().count(), 1);
    }

    #[test]
    fn blocked_images_path_surfaces_as_io_error() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        fs::write(&images, "not a directory").unwrap();
        let manager = CaptureManager::new(images, StubFrameSource::ready());

        let err = manager.capture(None).unwrap_err();

        assert!(matches!(err, CaptureError::Io(_)));
    }
}
