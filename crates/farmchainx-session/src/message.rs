//! User-facing session messages.
//!
//! Every recoverable failure in the scan flow surfaces as exactly one
//! [`UserMessage`] on the session instead of an ad-hoc alert. The variants
//! carry the data a frontend needs to render the message; [`fmt::Display`]
//! provides the default English rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum payload characters echoed back in an unrecognized-payload message.
const SNIPPET_MAX_LEN: usize = 48;

/// A message shown to the user, attached to the scan session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserMessage {
    /// Camera permission was refused; the file-upload path still works.
    PermissionDenied,

    /// Camera or decoder fault; scanning can be restarted.
    ScanFailed { message: String },

    /// The code decoded fine but carries no product identifier.
    UnrecognizedPayload { snippet: String },

    /// An uploaded image contained no readable code.
    NoCodeFound,

    /// The uploaded file was rejected before decoding.
    UnreadableImage { message: String },

    /// Navigation to the verification view failed; a retry is possible.
    NavigationFailed { message: String },
}

impl UserMessage {
    /// Camera or decoder fault.
    pub fn scan_failed(message: impl Into<String>) -> Self {
        Self::ScanFailed {
            message: message.into(),
        }
    }

    /// Unrecognized payload, echoing a capped preview of the decoded text.
    pub fn unrecognized_payload(payload: &farmchainx_core::DecodedPayload) -> Self {
        Self::UnrecognizedPayload {
            snippet: payload.snippet(SNIPPET_MAX_LEN),
        }
    }

    /// No code in an uploaded image.
    pub fn no_code_found() -> Self {
        Self::NoCodeFound
    }

    /// Rejected upload.
    pub fn unreadable_image(message: impl Into<String>) -> Self {
        Self::UnreadableImage {
            message: message.into(),
        }
    }

    /// Failed navigation attempt.
    pub fn navigation_failed(message: impl Into<String>) -> Self {
        Self::NavigationFailed {
            message: message.into(),
        }
    }

    /// Whether the user can retry the failed action without restarting.
    pub fn is_retryable(&self) -> bool {
        matches!(self, UserMessage::NavigationFailed { .. })
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserMessage::PermissionDenied => write!(
                f,
                "Camera access was denied. You can upload a photo of the code instead."
            ),
            UserMessage::ScanFailed { message } => {
                write!(f, "Scanning failed: {message}. Restart to try again.")
            }
            UserMessage::UnrecognizedPayload { snippet } => write!(
                f,
                "The scanned code ({snippet}) does not contain a product identifier."
            ),
            UserMessage::NoCodeFound => {
                write!(f, "No QR code was found in the uploaded image.")
            }
            UserMessage::UnreadableImage { message } => {
                write!(f, "The uploaded image could not be read: {message}")
            }
            UserMessage::NavigationFailed { message } => write!(
                f,
                "Could not open the verification page ({message}). Please retry."
            ),
        }
    }
}
