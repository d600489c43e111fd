//! Image acquisition layer for the FarmChainX scanner.
//!
//! This crate produces still frames for QR decoding from one of two sources:
//!
//! - a live camera stream, abstracted behind the [`CameraDevice`] trait so
//!   the scan controller can run against mock hardware in tests and real
//!   drivers later;
//! - a user-selected image file, validated against the upload contract
//!   (JPEG/PNG/WebP, 5 MB cap) and collapsed into a single decodable frame.
//!
//! # Design
//!
//! All camera I/O is asynchronous using native `async fn` in traits
//! (Rust 1.90 + Edition 2024 RPITIT). The traits are not object-safe;
//! dynamic dispatch goes through the [`AnyCameraDevice`] enum wrapper
//! instead of `dyn`, keeping dispatch zero-cost.
//!
//! Camera permission is requested exactly once per session and the decision
//! is surfaced as data (`Ok(false)` for denial), not as an error: denial is
//! a normal user choice the session must handle by offering the file-upload
//! alternative.
//!
//! Torch (flash) support is probed per device. Devices without a torch
//! report it in their capabilities and accept `set_torch` as a no-op rather
//! than erroring.
//!
//! # Mock camera
//!
//! [`MockCamera`] pairs a device with a control handle, the same split the
//! scanner's test-suite relies on: the handle grants or denies permission,
//! queues frames, injects stream faults, and observes that `release()` was
//! called.

pub mod devices;
pub mod error;
pub mod file;
pub mod mock;
pub mod traits;
pub mod types;

pub use devices::AnyCameraDevice;
pub use error::{CaptureError, Result};
pub use file::load_upload;
pub use mock::{MockCamera, MockCameraHandle};
pub use traits::CameraDevice;
pub use types::{CameraCapabilities, CameraInfo, Frame};
