//! Core domain types for the FarmChainX scan/verify pipeline.
//!
//! This crate holds everything the other crates agree on: the product
//! identifier newtype, the decoded-payload wrapper, the result interpreter
//! that extracts identifiers from scanned text, the verification record
//! consumed from the backend, and the shared error type.
//!
//! No I/O happens here. Camera access lives in `farmchainx-capture`, QR
//! decoding in `farmchainx-decode`, and the REST client in
//! `farmchainx-verify`.

pub mod constants;
pub mod error;
pub mod interpreter;
pub mod record;
pub mod types;

pub use error::{Error, Result};
pub use interpreter::interpret;
pub use record::{EventStatus, SupplyChainEvent, VerificationRecord};
pub use types::{DecodedPayload, ProductId, VerificationTarget};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
