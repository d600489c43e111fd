//! Verification navigation and record fetching.
//!
//! Two concerns live here, both downstream of a successful decode:
//!
//! - the [`Navigator`] trait: requesting a client-side route change to the
//!   verification detail view (`/verify/{identifier}`), with a mock
//!   implementation for tests and a real one backed by the REST client;
//! - [`VerifyClient`]: fetching the read-only [`VerificationRecord`] from
//!   the external backend via `GET /verify/{identifier}`.
//!
//! The client is a simple transport layer in the same spirit as a
//! single-connection device client: no automatic retry, no pooling beyond
//! what `reqwest` does internally, clear errors for the caller to map into
//! session state.
//!
//! [`VerificationRecord`]: farmchainx_core::VerificationRecord

pub mod client;
pub mod error;
pub mod navigator;

pub use client::{VerifyClient, VerifyClientConfig};
pub use error::{Result, VerifyError};
pub use navigator::{MockNavigator, Navigator, VerifyingNavigator, verify_route};
