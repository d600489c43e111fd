//! Mock camera implementation for testing and development.
//!
//! No physical camera is required anywhere in this workspace; the scan
//! controller is exercised entirely against this mock.

mod camera;

pub use camera::{MockCamera, MockCameraHandle};
