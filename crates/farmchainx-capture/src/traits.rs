//! Camera device trait definition.
//!
//! The [`CameraDevice`] trait is the contract between the scan controller
//! and whatever supplies live frames. It uses native `async fn` methods
//! (Rust 1.90 + Edition 2024 RPITIT), so it is not object-safe; use generic
//! parameters, or the [`AnyCameraDevice`](crate::devices::AnyCameraDevice)
//! enum wrapper for dispatch.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::{CameraCapabilities, CameraInfo, Frame};

/// Live camera abstraction.
///
/// A device moves through a simple lifecycle: permission is requested once,
/// frames are pulled while the stream is active, and `release()` ends the
/// stream deterministically. Implementations must make `release()`
/// idempotent, because the controller releases on every exit path and may
/// do so more than once during error recovery.
///
/// # Examples
///
/// ```no_run
/// use farmchainx_capture::{CameraDevice, Frame, Result};
///
/// async fn first_frame<C: CameraDevice>(camera: &mut C) -> Result<Option<Frame>> {
///     if !camera.request_permission().await? {
///         return Ok(None);
///     }
///     let frame = camera.next_frame().await?;
///     camera.release().await?;
///     Ok(Some(frame))
/// }
/// ```
pub trait CameraDevice: Send + Sync {
    /// Request camera permission from the user.
    ///
    /// May wait unbounded on a user prompt. Returns `Ok(false)` on denial;
    /// denial is a decision, not a device fault.
    ///
    /// # Errors
    ///
    /// Returns an error if the device disappears while the prompt is open.
    async fn request_permission(&mut self) -> Result<bool>;

    /// Pull the next frame from the live stream.
    ///
    /// Blocks asynchronously until a frame is available. Called repeatedly
    /// by the scan loop; most frames will contain no code at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream faults or the device was released.
    async fn next_frame(&mut self) -> Result<Frame>;

    /// Probe device capabilities (torch support).
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be queried.
    async fn capabilities(&self) -> Result<CameraCapabilities>;

    /// Switch the torch on or off.
    ///
    /// Returns the effective torch state. Devices without a torch accept
    /// the call and return `Ok(false)`; missing torch support is never a
    /// fault.
    ///
    /// # Errors
    ///
    /// Returns an error only on communication failure.
    async fn set_torch(&mut self, enabled: bool) -> Result<bool>;

    /// Release the camera stream and hardware resource.
    ///
    /// Idempotent. After release, `next_frame` fails with a disconnected
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying driver fails to close cleanly.
    async fn release(&mut self) -> Result<()>;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be queried.
    async fn info(&self) -> Result<CameraInfo>;
}
