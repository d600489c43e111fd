//! Enum wrapper for camera device dispatch.
//!
//! Native `async fn` in traits (RPITIT, Edition 2024) is not object-safe,
//! so `Box<dyn CameraDevice>` is not available. The [`AnyCameraDevice`]
//! enum provides concrete dispatch at compile time instead: zero-cost,
//! type-safe, and open to real hardware variants behind feature flags
//! later.

use crate::mock::MockCamera;
use crate::traits::CameraDevice;
use crate::{CameraCapabilities, CameraInfo, Frame, Result};

/// Enum wrapper for camera device dispatch.
///
/// # Examples
///
/// ```
/// use farmchainx_capture::{AnyCameraDevice, CameraDevice, MockCamera};
///
/// #[tokio::main]
/// async fn main() -> farmchainx_capture::Result<()> {
///     let (camera, _handle) = MockCamera::new();
///     let any_camera = AnyCameraDevice::Mock(camera);
///
///     let info = any_camera.info().await?;
///     assert_eq!(info.name, "Mock Camera");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyCameraDevice {
    /// Mock camera for development and testing.
    Mock(MockCamera),
}

impl CameraDevice for AnyCameraDevice {
    async fn request_permission(&mut self) -> Result<bool> {
        match self {
            Self::Mock(device) => device.request_permission().await,
        }
    }

    async fn next_frame(&mut self) -> Result<Frame> {
        match self {
            Self::Mock(device) => device.next_frame().await,
        }
    }

    async fn capabilities(&self) -> Result<CameraCapabilities> {
        match self {
            Self::Mock(device) => device.capabilities().await,
        }
    }

    async fn set_torch(&mut self, enabled: bool) -> Result<bool> {
        match self {
            Self::Mock(device) => device.set_torch(enabled).await,
        }
    }

    async fn release(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.release().await,
        }
    }

    async fn info(&self) -> Result<CameraInfo> {
        match self {
            Self::Mock(device) => device.info().await,
        }
    }
}
