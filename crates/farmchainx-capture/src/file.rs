//! File-upload acquisition path.
//!
//! The upload path bypasses camera permission entirely: the user selects
//! exactly one image file, it is validated against the upload contract
//! (non-empty, at most 5 MB, JPEG/PNG/WebP), and collapsed into a single
//! decodable [`Frame`].

use crate::{CaptureError, Frame, Result};
use farmchainx_core::constants::{ACCEPTED_IMAGE_MIME_TYPES, MAX_UPLOAD_BYTES};
use image::ImageFormat;
use tracing::debug;

/// MIME type for a detected image format, if the format is one we can name.
fn mime_of(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Png => "image/png",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Gif => "image/gif",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Validate an uploaded image and produce one decodable frame.
///
/// # Errors
///
/// - `EmptyImage` for zero-byte input.
/// - `ImageTooLarge` above the 5 MB cap (checked before any decoding).
/// - `UnsupportedImageFormat` when the magic bytes are not JPEG, PNG or
///   WebP, or are not recognizable as any image at all.
/// - `UnreadableImage` when the format is accepted but the pixel data does
///   not decode.
///
/// # Examples
///
/// ```
/// use farmchainx_capture::{CaptureError, load_upload};
///
/// let result = load_upload(&[]);
/// assert!(matches!(result, Err(CaptureError::EmptyImage)));
/// ```
pub fn load_upload(bytes: &[u8]) -> Result<Frame> {
    if bytes.is_empty() {
        return Err(CaptureError::EmptyImage);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(CaptureError::ImageTooLarge {
            size: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }

    let format = image::guess_format(bytes).map_err(|_| CaptureError::UnsupportedImageFormat {
        detected: "unknown".to_string(),
    })?;

    let mime = mime_of(format);
    if !ACCEPTED_IMAGE_MIME_TYPES.contains(&mime) {
        return Err(CaptureError::UnsupportedImageFormat {
            detected: mime.to_string(),
        });
    }

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CaptureError::unreadable(e.to_string()))?;

    debug!(
        mime,
        width = image.width(),
        height = image.height(),
        "upload accepted"
    );

    Ok(Frame::from_luma(image.to_luma8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            width,
            height,
            image::Luma([128u8]),
        ));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(load_upload(&[]), Err(CaptureError::EmptyImage)));
    }

    #[test]
    fn test_oversized_rejected_before_decoding() {
        // Garbage content: the size check must fire first.
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            load_upload(&bytes),
            Err(CaptureError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_png_accepted() {
        let frame = load_upload(&png_bytes(16, 8)).unwrap();
        assert_eq!((frame.width, frame.height), (16, 8));
    }

    #[test]
    fn test_unrecognized_bytes_rejected() {
        let result = load_upload(b"definitely not an image");
        match result {
            Err(CaptureError::UnsupportedImageFormat { detected }) => {
                assert_eq!(detected, "unknown");
            }
            other => panic!("expected UnsupportedImageFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_disallowed_format_rejected() {
        // Valid GIF header: recognized as an image, but not an accepted type.
        let gif_header = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let result = load_upload(gif_header);
        match result {
            Err(CaptureError::UnsupportedImageFormat { detected }) => {
                assert_eq!(detected, "image/gif");
            }
            other => panic!("expected UnsupportedImageFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_png_unreadable() {
        let mut bytes = png_bytes(16, 16);
        bytes.truncate(20); // keep the magic, drop the data
        assert!(matches!(
            load_upload(&bytes),
            Err(CaptureError::UnreadableImage { .. })
        ));
    }
}
