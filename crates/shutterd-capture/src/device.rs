// ABOUTME: Camera device seam: the FrameSource trait and its nokhwa-backed implementation.
// ABOUTME: Opens a device per grab so the port can vary between requests.

use image::RgbImage;
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use thiserror::Error;

/// Errors raised by a frame source. Open and read failures are kept apart so
/// the log tells an unplugged device from one that opened but produced
/// nothing.
#[derive(Debug, Error)]
pub enum FrameSourceError {
    #[error("failed to open device: {0}")]
    Open(String),

    #[error("failed to read frame: {0}")]
    Frame(String),
}

/// A source of single still frames, keyed by device index. The device is
/// opened, read once, and released within one call; the read blocks until
/// the device produces a frame or fails.
pub trait FrameSource: Send {
    fn grab_frame(&self, index: u32) -> Result<RgbImage, FrameSourceError>;
}

/// Production frame source backed by nokhwa's native platform input.
pub struct NokhwaSource;

impl FrameSource for NokhwaSource {
    fn grab_frame(&self, index: u32) -> Result<RgbImage, FrameSourceError> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|err| FrameSourceError::Open(err.to_string()))?;

        camera
            .open_stream()
            .map_err(|err| FrameSourceError::Open(err.to_string()))?;

        let frame = camera
            .frame()
            .map_err(|err| FrameSourceError::Frame(err.to_string()))?;

        // Release the device before decoding; only one handle can be held
        // safely at a time.
        if let Err(err) = camera.stop_stream() {
            tracing::warn!(index, error = %err, "failed to stop camera stream");
        }

        let image = frame
            .decode_image::<RgbFormat>()
            .map_err(|err| FrameSourceError::Frame(err.to_string()))?;

        tracing::debug!(
            index,
            width = image.width(),
            height = image.height(),
            "grabbed frame"
        );

        Ok(image)
    }
}
