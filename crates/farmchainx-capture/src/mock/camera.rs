//! Mock camera for testing and development.
//!
//! This module provides a simulated camera that can be controlled
//! programmatically: permission decisions, frames, and stream faults are
//! all injected through a control handle, and the handle can observe that
//! the device was released.

use crate::{
    CaptureError, Result,
    traits::CameraDevice,
    types::{CameraCapabilities, CameraInfo, Frame},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// Internal event type for the mock frame stream.
#[derive(Debug, Clone)]
enum StreamEvent {
    /// A frame arrived from the simulated sensor.
    Frame(Frame),

    /// The stream faulted (not a "no code found" condition).
    Fault(String),
}

/// Mock camera for testing and development.
///
/// Simulates a live camera by pulling permission decisions and frames from
/// channels fed by a [`MockCameraHandle`].
///
/// # Examples
///
/// ```
/// use farmchainx_capture::{CameraDevice, Frame, MockCamera};
///
/// #[tokio::main]
/// async fn main() -> farmchainx_capture::Result<()> {
///     let (mut camera, handle) = MockCamera::new();
///
///     handle.grant_permission().await?;
///     handle
///         .push_frame(Frame::new(vec![255u8; 64], 8, 8)?)
///         .await?;
///
///     assert!(camera.request_permission().await?);
///     let frame = camera.next_frame().await?;
///     assert_eq!(frame.width, 8);
///
///     camera.release().await?;
///     assert!(handle.was_released());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockCamera {
    /// Channel receiver for permission decisions.
    permission_rx: mpsc::Receiver<bool>,

    /// Channel receiver for stream events.
    stream_rx: mpsc::Receiver<StreamEvent>,

    /// Device name.
    name: String,

    /// Whether the simulated device has a torch.
    torch_supported: bool,

    /// Current torch state.
    torch_enabled: bool,

    /// Release flag shared with the handle.
    released: Arc<AtomicBool>,
}

impl MockCamera {
    /// Create a new mock camera without torch support.
    ///
    /// Returns a tuple of (MockCamera, MockCameraHandle) where the handle
    /// drives the simulation.
    pub fn new() -> (Self, MockCameraHandle) {
        Self::with_options("Mock Camera".to_string(), false)
    }

    /// Create a new mock camera with torch support.
    pub fn with_torch() -> (Self, MockCameraHandle) {
        Self::with_options("Mock Camera".to_string(), true)
    }

    /// Create a new mock camera with a custom name and torch flag.
    pub fn with_options(name: String, torch_supported: bool) -> (Self, MockCameraHandle) {
        let (permission_tx, permission_rx) = mpsc::channel(4);
        let (stream_tx, stream_rx) = mpsc::channel(32);
        let released = Arc::new(AtomicBool::new(false));

        let camera = Self {
            permission_rx,
            stream_rx,
            name: name.clone(),
            torch_supported,
            torch_enabled: false,
            released: Arc::clone(&released),
        };

        let handle = MockCameraHandle {
            permission_tx,
            stream_tx,
            released,
            name,
        };

        (camera, handle)
    }

    /// Current torch state, for assertions in tests.
    pub fn torch_enabled(&self) -> bool {
        self.torch_enabled
    }

    fn check_released(&self) -> Result<()> {
        if self.released.load(Ordering::SeqCst) {
            return Err(CaptureError::disconnected(self.name.clone()));
        }
        Ok(())
    }
}

impl CameraDevice for MockCamera {
    async fn request_permission(&mut self) -> Result<bool> {
        self.check_released()?;
        self.permission_rx
            .recv()
            .await
            .ok_or_else(|| CaptureError::disconnected("permission channel closed"))
    }

    async fn next_frame(&mut self) -> Result<Frame> {
        self.check_released()?;
        let event = self
            .stream_rx
            .recv()
            .await
            .ok_or_else(|| CaptureError::disconnected("stream channel closed"))?;

        match event {
            StreamEvent::Frame(frame) => Ok(frame),
            StreamEvent::Fault(message) => Err(CaptureError::stream_fault(message)),
        }
    }

    async fn capabilities(&self) -> Result<CameraCapabilities> {
        Ok(CameraCapabilities {
            torch: self.torch_supported,
        })
    }

    async fn set_torch(&mut self, enabled: bool) -> Result<bool> {
        // Permissive fallback: no torch means the call is a quiet no-op.
        if !self.torch_supported {
            return Ok(false);
        }
        self.torch_enabled = enabled;
        Ok(self.torch_enabled)
    }

    async fn release(&mut self) -> Result<()> {
        self.released.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn info(&self) -> Result<CameraInfo> {
        Ok(CameraInfo::new(self.name.clone(), "Mock").with_firmware_version("mock-1.0"))
    }
}

/// Handle for controlling a mock camera.
///
/// The handle is the "user and hardware" side of the simulation: it answers
/// the permission prompt, feeds frames into the stream, injects faults, and
/// observes the release hook.
#[derive(Debug, Clone)]
pub struct MockCameraHandle {
    /// Channel sender for permission decisions.
    permission_tx: mpsc::Sender<bool>,

    /// Channel sender for stream events.
    stream_tx: mpsc::Sender<StreamEvent>,

    /// Release flag shared with the device.
    released: Arc<AtomicBool>,

    /// Device name.
    name: String,
}

impl MockCameraHandle {
    /// Answer a pending (or future) permission prompt with a grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera has been dropped.
    pub async fn grant_permission(&self) -> Result<()> {
        self.send_permission(true).await
    }

    /// Answer a pending (or future) permission prompt with a denial.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera has been dropped.
    pub async fn deny_permission(&self) -> Result<()> {
        self.send_permission(false).await
    }

    async fn send_permission(&self, granted: bool) -> Result<()> {
        self.permission_tx
            .send(granted)
            .await
            .map_err(|_| CaptureError::disconnected("permission channel closed"))
    }

    /// Push a frame into the simulated stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera has been dropped.
    pub async fn push_frame(&self, frame: Frame) -> Result<()> {
        self.stream_tx
            .send(StreamEvent::Frame(frame))
            .await
            .map_err(|_| CaptureError::disconnected("stream channel closed"))
    }

    /// Push an all-white frame with no code in it.
    ///
    /// Convenience for driving the "no code found" path of the scan loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera has been dropped.
    pub async fn push_blank_frame(&self, width: u32, height: u32) -> Result<()> {
        let frame = Frame::new(vec![255u8; width as usize * height as usize], width, height)?;
        self.push_frame(frame).await
    }

    /// Inject a stream fault.
    ///
    /// The next `next_frame()` call will fail with a stream fault carrying
    /// this message.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera has been dropped.
    pub async fn inject_fault(&self, message: impl Into<String>) -> Result<()> {
        self.stream_tx
            .send(StreamEvent::Fault(message.into()))
            .await
            .map_err(|_| CaptureError::disconnected("stream channel closed"))
    }

    /// Whether the camera's release hook has been called.
    pub fn was_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
