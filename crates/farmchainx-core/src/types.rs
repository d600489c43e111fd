use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Canonical product identifier (UUID).
///
/// Every verifiable product carries exactly one of these, printed inside the
/// QR label either bare or embedded in a verification URL. The newtype
/// guarantees that any identifier reaching the navigator or the REST client
/// already parsed as a well-formed UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Parse a product identifier from its string form.
    ///
    /// Accepts the hyphenated 8-4-4-4-12 hexadecimal form, case-insensitive.
    ///
    /// # Errors
    /// Returns `Error::InvalidIdentifier` if the string is not a well-formed
    /// UUID.
    pub fn parse(s: &str) -> Result<Self> {
        let uuid = Uuid::parse_str(s.trim())
            .map_err(|e| Error::InvalidIdentifier(format!("{s}: {e}")))?;
        Ok(ProductId(uuid))
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        ProductId(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Canonical lowercase hyphenated form
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ProductId::parse(s)
    }
}

/// Raw text decoded from a scanned code, prior to interpretation.
///
/// Immutable once captured. Held by the session only until the interpreter
/// has classified it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedPayload(String);

impl DecodedPayload {
    /// Wrap decoder output.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        DecodedPayload(text.into())
    }

    /// Get the payload text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated preview for user-facing messages.
    ///
    /// Payloads can be arbitrary text; messages shown to the user cap the
    /// echo at `max_len` characters with an ellipsis.
    #[must_use]
    pub fn snippet(&self, max_len: usize) -> String {
        if self.0.chars().count() <= max_len {
            self.0.clone()
        } else {
            let truncated: String = self.0.chars().take(max_len).collect();
            format!("{truncated}...")
        }
    }
}

impl fmt::Display for DecodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DecodedPayload {
    fn from(s: String) -> Self {
        DecodedPayload(s)
    }
}

/// Target of a verification navigation, derived from a decoded payload.
///
/// Absence of a target means the payload was not actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationTarget {
    /// The extracted canonical identifier.
    pub identifier: ProductId,
}

impl VerificationTarget {
    /// Create a target for an extracted identifier.
    #[must_use]
    pub fn new(identifier: ProductId) -> Self {
        Self { identifier }
    }
}
