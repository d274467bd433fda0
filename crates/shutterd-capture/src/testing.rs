// ABOUTME: Test utilities for shutterd-capture, including a stub frame source.
// ABOUTME: Used in tests to simulate camera devices without real hardware.

use std::sync::{Arc, Mutex};

use image::{Rgb, RgbImage};

use crate::device::{FrameSource, FrameSourceError};

/// A stub frame source that either produces a fixed tiny frame or fails to
/// open, and records every device index it was asked for.
///
/// Clones share their recorded state, so a test can hand one clone to a
/// `CaptureManager` and keep the other for assertions.
#[derive(Clone)]
pub struct StubFrameSource {
    available: bool,
    grabbed: Arc<Mutex<Vec<u32>>>,
}

impl StubFrameSource {
    /// A source that answers every grab with a 2x2 gray frame.
    pub fn ready() -> Self {
        Self {
            available: true,
            grabbed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A source whose device can never be opened.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            grabbed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Device indexes grabbed so far, in call order. Failed opens are not
    /// recorded.
    pub fn grabbed_indexes(&self) -> Vec<u32> {
        self.grabbed.lock().unwrap().clone()
    }
}

impl FrameSource for StubFrameSource {
    fn grab_frame(&self, index: u32) -> Result<RgbImage, FrameSourceError> {
        if !self.available {
            return Err(FrameSourceError::Open("no such device".to_string()));
        }
        self.grabbed.lock().unwrap().push(index);
        Ok(RgbImage::from_pixel(2, 2, Rgb([128, 128, 128])))
    }
}
