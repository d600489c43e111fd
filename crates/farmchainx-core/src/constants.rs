//! Wire-contract constants for the scan/verify pipeline.
//!
//! These values are shared with the external backend and with the QR labels
//! printed on produce. Changing them breaks compatibility with codes already
//! in circulation.

// ============================================================================
// Identifier Wire Contract
// ============================================================================

/// UUID-shaped identifier pattern (case-insensitive).
///
/// Product identifiers on the wire are hexadecimal 8-4-4-4-12 groups.
/// This is the raw pattern fragment; the interpreter anchors it behind the
/// verify path marker for the priority match.
///
/// # Examples
///
/// ```
/// use farmchainx_core::constants::UUID_PATTERN;
/// use regex::Regex;
///
/// let re = Regex::new(&format!("(?i){UUID_PATTERN}")).unwrap();
/// assert!(re.is_match("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
/// assert!(!re.is_match("not-a-uuid"));
/// ```
pub const UUID_PATTERN: &str =
    "[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}";

/// Path marker preceding an embedded identifier in scanned URLs.
///
/// QR labels usually carry a full verification URL such as
/// `https://app.farmchainx.example/verify/<uuid>`. The segment before the
/// identifier is this marker.
pub const VERIFY_PATH_MARKER: &str = "verify/";

/// Client-side route prefix for the verification detail view.
///
/// Navigation targets are built as `/verify/{identifier}`.
pub const VERIFY_ROUTE_PREFIX: &str = "/verify";

// ============================================================================
// Upload Constraints
// ============================================================================

/// Maximum accepted upload size for scanned images (bytes).
///
/// # Value: 5 MB
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types for the file-upload scan path.
///
/// Matches the backend's upload contract: JPEG, PNG and WebP only.
pub const ACCEPTED_IMAGE_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

// ============================================================================
// Timeout Configuration
// ============================================================================

/// Default timeout for verification record fetches (milliseconds).
///
/// # Value: 5000ms (5 seconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;
