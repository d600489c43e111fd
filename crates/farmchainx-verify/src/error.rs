//! Error types for verification fetch and navigation.

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Errors that can occur while navigating to or fetching a verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Route transition was rejected or errored.
    #[error("Navigation failed: {message}")]
    NavigationFailed { message: String },

    /// Backend answered non-200: the identifier is unknown or invalid.
    #[error("No verification record for {identifier} (HTTP {status})")]
    RecordNotFound { identifier: String, status: u16 },

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered 200 with a body that does not parse as a record.
    #[error("Invalid verification response: {message}")]
    InvalidResponse { message: String },

    /// Client configuration error (bad base URL).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl VerifyError {
    /// Create a new navigation failure.
    pub fn navigation_failed(message: impl Into<String>) -> Self {
        Self::NavigationFailed {
            message: message.into(),
        }
    }

    /// Create a new invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_failed_display() {
        let error = VerifyError::navigation_failed("route rejected");
        assert_eq!(error.to_string(), "Navigation failed: route rejected");
    }

    #[test]
    fn test_record_not_found_display() {
        let error = VerifyError::RecordNotFound {
            identifier: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string(),
            status: 404,
        };
        assert_eq!(
            error.to_string(),
            "No verification record for 3fa85f64-5717-4562-b3fc-2c963f66afa6 (HTTP 404)"
        );
    }
}
