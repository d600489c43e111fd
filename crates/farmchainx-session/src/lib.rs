//! Scan session orchestration for the FarmChainX scanner.
//!
//! This crate ties the pipeline together: the [`ScanSession`] state machine
//! tracks where one scan attempt stands, and the [`ScanController`] drives
//! a camera device (or an uploaded image) through decode, interpretation,
//! and the single navigation to the verification view.
//!
//! # Lifecycle
//!
//! ```text
//! Initializing ──permission granted──▶ Scanning ──decode──▶ Resolved
//!      │  │                               │                    │
//!      │  └──permission denied──▶ Denied  └──fault──▶ Error    │
//!      │                                                       │
//!      └──────────────── file upload ──────▶ Resolved / Error  │
//!                                                              │
//!                 restart() from any settled state ◀───────────┘
//! ```
//!
//! Every failure surfaces as a recoverable state plus a [`UserMessage`];
//! the camera is released on every exit path.

pub mod controller;
pub mod message;
pub mod state_machine;

pub use controller::ScanController;
pub use message::UserMessage;
pub use state_machine::{ScanMode, ScanSession, ScanStatus, StateTransition};
