//! QR decode adapter.

use crate::{DecodeError, Result};
use farmchainx_capture::Frame;
use farmchainx_core::DecodedPayload;
use tracing::{debug, trace};

/// Outcome of decoding one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A QR code was found and read.
    Decoded(DecodedPayload),

    /// No QR code in this frame.
    ///
    /// Expected and frequent during continuous scanning; callers must
    /// treat it as "keep sampling", never as a failure.
    NotFound,
}

impl DecodeOutcome {
    /// Returns `true` if a payload was decoded.
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

/// QR decoder, fixed to the QR symbology.
///
/// Stateless; one instance serves a whole session. Invoked once per
/// acquired frame by the scan loop and once per uploaded file.
///
/// # Examples
///
/// ```
/// use farmchainx_capture::Frame;
/// use farmchainx_decode::{DecodeOutcome, QrDecoder};
///
/// let decoder = QrDecoder::new();
/// let blank = Frame::new(vec![255u8; 100 * 100], 100, 100).unwrap();
/// assert_eq!(decoder.decode(blank).unwrap(), DecodeOutcome::NotFound);
/// ```
#[derive(Debug, Default)]
pub struct QrDecoder;

impl QrDecoder {
    /// Create a new decoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decode one frame.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` only when a code was detected but could not
    /// be read. Frames without any code yield `Ok(DecodeOutcome::NotFound)`.
    pub fn decode(&self, frame: Frame) -> Result<DecodeOutcome> {
        let mut prepared = rqrr::PreparedImage::prepare(frame.into_luma());
        let grids = prepared.detect_grids();

        if grids.is_empty() {
            trace!("no code in frame");
            return Ok(DecodeOutcome::NotFound);
        }

        // A frame can contain several detection candidates; the first one
        // that reads cleanly wins. All candidates failing is a real fault,
        // not a NotFound.
        let mut last_error = None;
        for grid in grids {
            match grid.decode() {
                Ok((_meta, content)) => {
                    debug!(len = content.len(), "decoded QR payload");
                    return Ok(DecodeOutcome::Decoded(DecodedPayload::new(content)));
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(DecodeError::malformed(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qr_frame(text: &str) -> Frame {
        let code = qrcode::QrCode::new(text.as_bytes()).unwrap();
        let image = code
            .render::<image::Luma<u8>>()
            .min_dimensions(200, 200)
            .build();
        Frame::from_luma(image)
    }

    #[test]
    fn test_blank_frame_is_not_found() {
        let decoder = QrDecoder::new();
        let blank = Frame::new(vec![255u8; 120 * 120], 120, 120).unwrap();
        assert_eq!(decoder.decode(blank).unwrap(), DecodeOutcome::NotFound);
    }

    #[test]
    fn test_noise_frame_is_not_found_or_malformed_never_decoded() {
        // Deterministic pseudo-noise; whatever the detector makes of it,
        // it must not produce a payload.
        let pixels: Vec<u8> = (0..160u32 * 160)
            .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
            .collect();
        let frame = Frame::new(pixels, 160, 160).unwrap();

        let decoder = QrDecoder::new();
        match decoder.decode(frame) {
            Ok(outcome) => assert_eq!(outcome, DecodeOutcome::NotFound),
            Err(DecodeError::Malformed { .. }) => {}
        }
    }

    #[test]
    fn test_decodes_rendered_qr() {
        let decoder = QrDecoder::new();
        let text = "https://app.example/verify/3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let outcome = decoder.decode(qr_frame(text)).unwrap();
        assert_eq!(outcome, DecodeOutcome::Decoded(DecodedPayload::new(text)));
    }

    #[test]
    fn test_decodes_plain_text_qr() {
        let decoder = QrDecoder::new();
        let outcome = decoder.decode(qr_frame("random-sticker-code-123")).unwrap();
        assert_eq!(
            outcome,
            DecodeOutcome::Decoded(DecodedPayload::new("random-sticker-code-123"))
        );
    }

    #[test]
    fn test_outcome_is_decoded() {
        assert!(DecodeOutcome::Decoded(DecodedPayload::new("x")).is_decoded());
        assert!(!DecodeOutcome::NotFound.is_decoded());
    }
}
