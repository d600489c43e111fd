//! Result interpreter: decoded text to canonical identifier.
//!
//! A decoded payload is actionable when it contains a product identifier.
//! Two patterns are tried in priority order:
//!
//! 1. An identifier embedded after a `verify/` path segment, the form our
//!    printed labels use (`https://.../verify/<uuid>`).
//! 2. A bare UUID-shaped token anywhere in the text.
//!
//! When the text contains both, the `verify/` match wins, even if another
//! UUID-shaped substring appears earlier in the text. Payloads matching
//! neither pattern are classified unrecognized: the interpreter returns
//! `None`, never an error.

use crate::constants::{UUID_PATTERN, VERIFY_PATH_MARKER};
use crate::types::{DecodedPayload, ProductId, VerificationTarget};
use regex::Regex;
use std::sync::LazyLock;

static VERIFY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){VERIFY_PATH_MARKER}({UUID_PATTERN})"))
        .expect("verify pattern is a valid regex")
});

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)({UUID_PATTERN})")).expect("uuid pattern is a valid regex")
});

/// Extract a verification target from decoded text.
///
/// Returns `None` when the payload carries no identifier. This is an
/// expected outcome for foreign stickers and plain-text codes, not a fault.
///
/// # Examples
///
/// ```
/// use farmchainx_core::{DecodedPayload, interpret};
///
/// let payload =
///     DecodedPayload::new("https://app.example/verify/3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// let target = interpret(&payload).unwrap();
/// assert_eq!(
///     target.identifier.to_string(),
///     "3fa85f64-5717-4562-b3fc-2c963f66afa6"
/// );
///
/// assert!(interpret(&DecodedPayload::new("random-sticker-code-123")).is_none());
/// ```
#[must_use]
pub fn interpret(payload: &DecodedPayload) -> Option<VerificationTarget> {
    let text = payload.as_str();

    let token = VERIFY_RE
        .captures(text)
        .or_else(|| UUID_RE.captures(text))
        .and_then(|caps| caps.get(1))?;

    // The regex guarantees UUID shape; a parse failure still classifies
    // the payload as unrecognized rather than erroring.
    let identifier = ProductId::parse(token.as_str()).ok()?;
    Some(VerificationTarget::new(identifier))
}
