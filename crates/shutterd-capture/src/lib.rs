// ABOUTME: Capture manager for shutterd: camera device access and image persistence.
// ABOUTME: Owns the images directory and the device seam the HTTP adapter drives.

pub mod device;
pub mod manager;
pub mod testing;

pub use device::{FrameSource, FrameSourceError, NokhwaSource};
pub use manager::{CaptureError, CaptureManager};
