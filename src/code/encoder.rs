//! Symbol encoding: payload string -> square QR bitmap
//!
//! The controller only sees the `SymbolEncoder` trait, so tests can swap in
//! encoders that fail on demand.

use image::{Rgba, RgbaImage};
use qrcodegen::{QrCode, QrCodeEcc};
use thiserror::Error;

/// Default bitmap edge length in pixels
pub const DEFAULT_CODE_SIZE: u32 = 1080;

/// Largest bitmap edge length accepted (64 MiB of RGBA)
pub const MAX_CODE_SIZE: u32 = 4096;

/// Light modules around the symbol (the QR quiet zone)
const QUIET_ZONE_MODULES: u32 = 4;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Why a payload could not be turned into a bitmap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("requested {width}x{height} but codes are square, 1 to 4096px")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("payload of {len} bytes does not fit in a QR code: {reason}")]
    DataTooLong { len: usize, reason: String },

    #[error("{modules} modules do not fit in {side}px")]
    CanvasTooSmall { side: u32, modules: u32 },
}

/// Square RGBA bitmap produced by an encoder
#[derive(Debug, Clone, PartialEq)]
pub struct SquareImage {
    pixels: RgbaImage,
}

impl SquareImage {
    /// Edge length in pixels
    pub fn side(&self) -> u32 {
        self.pixels.width()
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    #[cfg(test)]
    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y) == &DARK
    }
}

/// Turns a payload into a `width`x`height` bitmap, or fails
pub trait SymbolEncoder {
    fn encode(&self, payload: &str, width: u32, height: u32) -> Result<SquareImage, EncodingError>;
}

/// QR code encoder (error correction level Low, 4-module quiet zone)
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl SymbolEncoder for QrEncoder {
    fn encode(&self, payload: &str, width: u32, height: u32) -> Result<SquareImage, EncodingError> {
        if width != height || width == 0 || width > MAX_CODE_SIZE {
            return Err(EncodingError::InvalidDimensions { width, height });
        }
        let side = width;

        let qr = QrCode::encode_text(payload, QrCodeEcc::Low).map_err(|e| {
            EncodingError::DataTooLong {
                len: payload.len(),
                reason: e.to_string(),
            }
        })?;

        // Whole pixels per module, symbol centred in the canvas
        let modules = qr.size() as u32 + 2 * QUIET_ZONE_MODULES;
        let scale = side / modules;
        if scale == 0 {
            return Err(EncodingError::CanvasTooSmall { side, modules });
        }
        let offset = (side - modules * scale) / 2;
        let symbol_end = offset + modules * scale;

        let pixels = RgbaImage::from_fn(side, side, |x, y| {
            if x < offset || y < offset || x >= symbol_end || y >= symbol_end {
                return LIGHT;
            }
            let mx = ((x - offset) / scale) as i32 - QUIET_ZONE_MODULES as i32;
            let my = ((y - offset) / scale) as i32 - QUIET_ZONE_MODULES as i32;
            // get_module reports light for anything outside the symbol
            if qr.get_module(mx, my) {
                DARK
            } else {
                LIGHT
            }
        });

        log::debug!(
            "🔳 Encoded {} bytes as {}x{} modules at {}px/module",
            payload.len(),
            qr.size(),
            qr.size(),
            scale
        );

        Ok(SquareImage { pixels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_reference_size() {
        let image = QrEncoder
            .encode("abc/2025-06-01/student", DEFAULT_CODE_SIZE, DEFAULT_CODE_SIZE)
            .unwrap();
        assert_eq!(image.side(), 1080);
        assert_eq!(image.as_rgba().len(), 1080 * 1080 * 4);
    }

    #[test]
    fn test_quiet_zone_and_finder_pattern() {
        // 22 bytes -> version 2 (25 modules) + 8 quiet = 33; 1080 / 33 = 32px, offset 12
        let image = QrEncoder
            .encode("abc/2025-06-01/student", 1080, 1080)
            .unwrap();
        assert!(!image.is_dark(0, 0));
        assert!(!image.is_dark(12 + 3 * 32, 12 + 3 * 32));
        // Top-left finder corner is always dark
        assert!(image.is_dark(12 + 4 * 32, 12 + 4 * 32));
        assert!(!image.is_dark(1079, 1079));
    }

    #[test]
    fn test_rejects_non_square() {
        let err = QrEncoder.encode("abc", 300, 400).unwrap_err();
        assert_eq!(err, EncodingError::InvalidDimensions { width: 300, height: 400 });
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            QrEncoder.encode("abc", 0, 0),
            Err(EncodingError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_canvas() {
        for side in [MAX_CODE_SIZE + 1, 100_000, u32::MAX] {
            assert_eq!(
                QrEncoder.encode("abc/2025-06-01/student", side, side),
                Err(EncodingError::InvalidDimensions { width: side, height: side })
            );
        }
    }

    #[test]
    fn test_accepts_largest_canvas() {
        let image = QrEncoder.encode("abc", MAX_CODE_SIZE, MAX_CODE_SIZE).unwrap();
        assert_eq!(image.side(), MAX_CODE_SIZE);
    }

    #[test]
    fn test_payload_over_capacity() {
        // Byte mode tops out at 2953 bytes (version 40, level Low)
        let payload = "a".repeat(3000);
        let err = QrEncoder.encode(&payload, 1080, 1080).unwrap_err();
        assert!(matches!(err, EncodingError::DataTooLong { len: 3000, .. }));
    }

    #[test]
    fn test_canvas_too_small() {
        let err = QrEncoder.encode("abc", 20, 20).unwrap_err();
        assert_eq!(err, EncodingError::CanvasTooSmall { side: 20, modules: 29 });
    }

    #[test]
    fn test_non_ascii_payload() {
        assert!(QrEncoder.encode("Ünïcødé/2025-06-01/student", 1080, 1080).is_ok());
    }
}
