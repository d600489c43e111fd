//! Error type for the decode adapter.

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Genuine decoder faults.
///
/// "No code in this frame" is not represented here; that is the
/// [`DecodeOutcome::NotFound`](crate::DecodeOutcome::NotFound) outcome.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A code was detected in the frame but its contents failed to decode.
    #[error("Detected code could not be decoded: {message}")]
    Malformed { message: String },
}

impl DecodeError {
    /// Create a new malformed-code error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let error = DecodeError::malformed("ecc failure");
        assert_eq!(
            error.to_string(),
            "Detected code could not be decoded: ecc failure"
        );
    }
}
