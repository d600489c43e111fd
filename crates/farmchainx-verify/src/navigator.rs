//! Verification navigator.
//!
//! A navigator performs exactly one route change per successful decode.
//! The caller (the scan controller) is responsible for suppressing repeat
//! decodes while a navigation is pending; this module only guarantees that
//! a single `go_to` call either completes or reports failure synchronously
//! enough for the caller to reset its "navigating" state.

#![allow(async_fn_in_trait)]

use crate::{Result, VerifyClient, VerifyError};
use farmchainx_core::ProductId;
use farmchainx_core::constants::VERIFY_ROUTE_PREFIX;
use farmchainx_core::record::VerificationRecord;
use tracing::{debug, warn};

/// Build the client-side route for a verification detail view.
///
/// # Examples
///
/// ```
/// use farmchainx_core::ProductId;
/// use farmchainx_verify::verify_route;
///
/// let id = ProductId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(
///     verify_route(&id),
///     "/verify/3fa85f64-5717-4562-b3fc-2c963f66afa6"
/// );
/// ```
#[must_use]
pub fn verify_route(identifier: &ProductId) -> String {
    format!("{VERIFY_ROUTE_PREFIX}/{identifier}")
}

/// Client-side navigation to a verification detail view.
///
/// Not object-safe (native `async fn`); the scan controller takes it as a
/// generic parameter.
pub trait Navigator: Send + Sync {
    /// Request a route change to the detail view for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route transition is rejected or errors.
    /// Implementations must not leave a transition half-applied: on error
    /// the previous view is still current and the caller may retry.
    async fn go_to(&mut self, identifier: &ProductId) -> Result<()>;
}

/// Navigator whose route change is "fetch and present the record".
///
/// In this headless client, arriving at `/verify/{id}` means fetching the
/// verification record; the last fetched record plays the role of the
/// rendered detail view.
#[derive(Debug)]
pub struct VerifyingNavigator {
    client: VerifyClient,
    current_route: Option<String>,
    current_record: Option<VerificationRecord>,
}

impl VerifyingNavigator {
    /// Create a navigator backed by a verification client.
    #[must_use]
    pub fn new(client: VerifyClient) -> Self {
        Self {
            client,
            current_route: None,
            current_record: None,
        }
    }

    /// The route currently presented, if any.
    pub fn current_route(&self) -> Option<&str> {
        self.current_route.as_deref()
    }

    /// The record currently presented, if any.
    pub fn current_record(&self) -> Option<&VerificationRecord> {
        self.current_record.as_ref()
    }
}

impl Navigator for VerifyingNavigator {
    async fn go_to(&mut self, identifier: &ProductId) -> Result<()> {
        let route = verify_route(identifier);
        debug!(%route, "navigating");

        // Fetch first; the view only switches once the record is in hand,
        // so a failed transition leaves the previous view current.
        match self.client.fetch_record(identifier).await {
            Ok(record) => {
                self.current_record = Some(record);
                self.current_route = Some(route);
                Ok(())
            }
            Err(e) => {
                warn!(%route, error = %e, "navigation failed");
                Err(e)
            }
        }
    }
}

/// Mock navigator recording invocations, for tests.
///
/// # Examples
///
/// ```
/// use farmchainx_core::ProductId;
/// use farmchainx_verify::{MockNavigator, Navigator};
///
/// #[tokio::main]
/// async fn main() {
///     let mut navigator = MockNavigator::new();
///     let id = ProductId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
///
///     navigator.go_to(&id).await.unwrap();
///     assert_eq!(navigator.calls(), &[id]);
/// }
/// ```
#[derive(Debug, Default)]
pub struct MockNavigator {
    calls: Vec<ProductId>,
    fail_with: Option<String>,
}

impl MockNavigator {
    /// Create a mock navigator that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock navigator that rejects every transition.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(message.into()),
        }
    }

    /// Make subsequent transitions succeed again.
    pub fn succeed(&mut self) {
        self.fail_with = None;
    }

    /// All identifiers `go_to` was invoked with, in order.
    pub fn calls(&self) -> &[ProductId] {
        &self.calls
    }

    /// Number of `go_to` invocations.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl Navigator for MockNavigator {
    async fn go_to(&mut self, identifier: &ProductId) -> Result<()> {
        self.calls.push(*identifier);
        match &self.fail_with {
            Some(message) => Err(VerifyError::navigation_failed(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VerifyClientConfig;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const RECORD_JSON: &str = r#"{
        "productId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "farmerName": "Ravi Kumar",
        "harvestDate": "2025-10-15",
        "originLocation": "Sikar Farms, Rajasthan",
        "qualityGrade": "A+",
        "logs": []
    }"#;

    fn id() -> ProductId {
        ProductId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap()
    }

    /// Serve the given canned HTTP responses, one per connection, in order.
    async fn serve_responses(
        responses: Vec<(&'static str, &'static str)>,
    ) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for (status_line, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = [0u8; 2048];
                let _ = socket.read(&mut request).await;

                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        addr
    }

    fn navigator_for(addr: std::net::SocketAddr) -> VerifyingNavigator {
        let client = VerifyClient::new(VerifyClientConfig {
            base_url: format!("http://{addr}"),
            timeout: Duration::from_millis(2000),
        })
        .unwrap();
        VerifyingNavigator::new(client)
    }

    #[test]
    fn test_verify_route() {
        assert_eq!(
            verify_route(&id()),
            "/verify/3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }

    #[tokio::test]
    async fn test_verifying_navigator_switches_view_on_success() {
        let addr = serve_responses(vec![("HTTP/1.1 200 OK", RECORD_JSON)]).await;
        let mut navigator = navigator_for(addr);

        assert!(navigator.current_route().is_none());
        navigator.go_to(&id()).await.unwrap();

        assert_eq!(
            navigator.current_route(),
            Some("/verify/3fa85f64-5717-4562-b3fc-2c963f66afa6")
        );
        assert_eq!(
            navigator.current_record().unwrap().farmer_name,
            "Ravi Kumar"
        );
    }

    #[tokio::test]
    async fn test_verifying_navigator_failure_leaves_no_view() {
        let addr = serve_responses(vec![("HTTP/1.1 404 Not Found", "{}")]).await;
        let mut navigator = navigator_for(addr);

        let result = navigator.go_to(&id()).await;
        assert!(matches!(result, Err(VerifyError::RecordNotFound { .. })));

        assert!(navigator.current_route().is_none());
        assert!(navigator.current_record().is_none());
    }

    #[tokio::test]
    async fn test_verifying_navigator_failure_keeps_previous_view() {
        // First fetch succeeds, second is rejected: the presented view must
        // stay on the first record so the user can retry.
        let addr = serve_responses(vec![
            ("HTTP/1.1 200 OK", RECORD_JSON),
            ("HTTP/1.1 404 Not Found", "{}"),
        ])
        .await;
        let mut navigator = navigator_for(addr);

        navigator.go_to(&id()).await.unwrap();
        let route_before = navigator.current_route().unwrap().to_string();

        let other = ProductId::parse("11111111-2222-3333-4444-555555555555").unwrap();
        assert!(navigator.go_to(&other).await.is_err());

        assert_eq!(navigator.current_route(), Some(route_before.as_str()));
        assert_eq!(
            navigator.current_record().unwrap().product_id.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }

    #[tokio::test]
    async fn test_mock_navigator_records_calls() {
        let mut navigator = MockNavigator::new();
        navigator.go_to(&id()).await.unwrap();
        navigator.go_to(&id()).await.unwrap();
        assert_eq!(navigator.call_count(), 2);
        assert_eq!(navigator.calls(), &[id(), id()]);
    }

    #[tokio::test]
    async fn test_mock_navigator_failure() {
        let mut navigator = MockNavigator::failing("route rejected");
        let result = navigator.go_to(&id()).await;
        assert!(matches!(result, Err(VerifyError::NavigationFailed { .. })));
        // The attempt is still recorded.
        assert_eq!(navigator.call_count(), 1);

        navigator.succeed();
        assert!(navigator.go_to(&id()).await.is_ok());
    }
}
