//! Error types for image acquisition.
//!
//! Covers camera stream faults, permission handling, and upload validation
//! failures. "No QR code in this frame" is NOT an error in this crate or
//! anywhere else; that outcome belongs to the decode adapter.

/// Result type alias for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur while acquiring an image.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Camera permission was refused by the user.
    ///
    /// Not retried automatically; the session offers the upload path.
    #[error("Camera permission denied for {device}")]
    PermissionDenied { device: String },

    /// Camera is gone or was released.
    #[error("Camera disconnected: {device}")]
    Disconnected { device: String },

    /// Camera stream produced a fault unrelated to frame content.
    #[error("Camera stream fault: {message}")]
    StreamFault { message: String },

    /// Uploaded file was empty.
    #[error("Uploaded image is empty")]
    EmptyImage,

    /// Uploaded file exceeds the size cap.
    #[error("Uploaded image is {size} bytes, maximum is {max}")]
    ImageTooLarge { size: usize, max: usize },

    /// Uploaded file is not one of the accepted image types.
    #[error("Unsupported image format: {detected}")]
    UnsupportedImageFormat { detected: String },

    /// Uploaded file looked like an image but could not be decoded.
    #[error("Unreadable image: {message}")]
    UnreadableImage { message: String },

    /// Frame dimensions and pixel buffer disagree.
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Create a new permission denied error.
    pub fn permission_denied(device: impl Into<String>) -> Self {
        Self::PermissionDenied {
            device: device.into(),
        }
    }

    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new stream fault error.
    pub fn stream_fault(message: impl Into<String>) -> Self {
        Self::StreamFault {
            message: message.into(),
        }
    }

    /// Create a new unreadable image error.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::UnreadableImage {
            message: message.into(),
        }
    }

    /// Create a new invalid frame error.
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }
}
