//! Common types shared across camera implementations.

use crate::{CaptureError, Result};
use serde::{Deserialize, Serialize};

/// A single grayscale still frame ready for decoding.
///
/// Frames are luma8: one byte per pixel, row-major. The QR decoder works on
/// luminance only, so color data is dropped at the acquisition boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Luma pixel data, `width * height` bytes, row-major.
    pub pixels: Vec<u8>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// When the frame was captured.
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

impl Frame {
    /// Create a frame from raw luma data with validation.
    ///
    /// # Errors
    /// Returns `CaptureError::InvalidFrame` if the dimensions are zero or
    /// the buffer length does not match `width * height`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CaptureError::invalid_frame(format!(
                "Zero dimension: {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CaptureError::invalid_frame(format!(
                "Buffer is {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
            captured_at: chrono::Utc::now(),
        })
    }

    /// Build a frame from a decoded grayscale image.
    #[must_use]
    pub fn from_luma(image: image::GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            pixels: image.into_raw(),
            width,
            height,
            captured_at: chrono::Utc::now(),
        }
    }

    /// Convert the frame back into a grayscale image.
    ///
    /// Consumes the frame; the pixel buffer is moved, not copied.
    #[must_use]
    pub fn into_luma(self) -> image::GrayImage {
        // Frame invariant guarantees buffer length matches dimensions.
        image::GrayImage::from_raw(self.width, self.height, self.pixels)
            .expect("frame buffer matches dimensions")
    }
}

/// Capabilities probed from a camera device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraCapabilities {
    /// Whether the device has a controllable torch (flash).
    pub torch: bool,
}

impl CameraCapabilities {
    /// Capabilities with no optional features.
    #[must_use]
    pub fn none() -> Self {
        Self { torch: false }
    }
}

/// Camera device information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraInfo {
    /// Device name (e.g., "Mock Camera", "Integrated Webcam").
    pub name: String,

    /// Device model identifier.
    pub model: String,

    /// Optional driver/firmware version string.
    pub firmware_version: Option<String>,
}

impl CameraInfo {
    /// Create a new CameraInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            firmware_version: None,
        }
    }

    /// Set the firmware version.
    pub fn with_firmware_version(mut self, firmware_version: impl Into<String>) -> Self {
        self.firmware_version = Some(firmware_version.into());
        self
    }
}
