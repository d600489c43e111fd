//! REST client for the verification backend.
//!
//! The backend owns the verification records; this client only reads them.
//! One operation exists: `GET {base}/verify/{identifier}`. Any non-200
//! status means "not found or invalid" per the wire contract, regardless
//! of which error family the backend chose.
//!
//! # Design Principles
//!
//! - **No automatic retry**: the session decides whether to retry.
//! - **Simple error handling**: clear errors, no recovery here.
//! - **Timeouts on every request**: a scan flow must never hang on the
//!   network; default is 5 seconds.

use crate::{Result, VerifyError};
use farmchainx_core::ProductId;
use farmchainx_core::constants::DEFAULT_FETCH_TIMEOUT_MS;
use farmchainx_core::record::VerificationRecord;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the verification client.
///
/// # Example
///
/// ```
/// use farmchainx_verify::VerifyClientConfig;
/// use std::time::Duration;
///
/// let config = VerifyClientConfig {
///     base_url: "https://api.farmchainx.example".to_string(),
///     timeout: Duration::from_millis(3000),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct VerifyClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,

    /// Timeout for each fetch.
    pub timeout: Duration,
}

impl Default for VerifyClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        }
    }
}

/// HTTP client for verification record fetches.
#[derive(Debug, Clone)]
pub struct VerifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerifyClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::InvalidBaseUrl` if the base URL is empty, and
    /// `VerifyError::Http` if the underlying HTTP client cannot be built.
    pub fn new(config: VerifyClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(VerifyError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The URL a record fetch for `identifier` hits.
    #[must_use]
    pub fn record_url(&self, identifier: &ProductId) -> String {
        format!("{}/verify/{identifier}", self.base_url)
    }

    /// Fetch the verification record for a product.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` for any non-200 response.
    /// - `Http` for transport failures (connect, timeout).
    /// - `InvalidResponse` when the 200 body does not parse as a record.
    pub async fn fetch_record(&self, identifier: &ProductId) -> Result<VerificationRecord> {
        let url = self.record_url(identifier);
        debug!(%url, "fetching verification record");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "verification fetch rejected");
            return Err(VerifyError::RecordNotFound {
                identifier: identifier.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let record: VerificationRecord = serde_json::from_str(&body)
            .map_err(|e| VerifyError::invalid_response(e.to_string()))?;

        debug!(product = %record.product_id, events = record.logs.len(), "record fetched");
        Ok(record)
    }
}
