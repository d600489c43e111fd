//! Decode adapter over the `rqrr` QR decoder.
//!
//! The adapter narrows the third-party decoder's output to a two-case
//! result before it touches application logic:
//!
//! - [`DecodeOutcome::Decoded`] — a QR code was found and read;
//! - [`DecodeOutcome::NotFound`] — no code in this frame. This is the
//!   common case during continuous camera scanning and is never an error.
//!
//! Genuine decode faults (a code was detected but its data is corrupt)
//! surface as [`DecodeError`] and are the only error this crate produces.
//!
//! Only the QR symbology is recognized. `rqrr` decodes nothing else, which
//! matches the scanner's contract: other barcode formats on produce labels
//! are not recognized.

pub mod adapter;
pub mod error;

pub use adapter::{DecodeOutcome, QrDecoder};
pub use error::{DecodeError, Result};
