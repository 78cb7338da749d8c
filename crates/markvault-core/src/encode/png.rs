//! PNG encoding for export.
//!
//! Uses the `image` crate's PNG encoder with default compression. Output is
//! deterministic for identical input, which the pipeline relies on when
//! comparing renders.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

use crate::surface::{ImageSurface, CHANNELS};

/// The eight-byte signature every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Example
///
/// ```
/// use markvault_core::encode::{encode_png, PNG_SIGNATURE};
///
/// let pixels = vec![128u8; 10 * 10 * 4];
/// let png = encode_png(&pixels, 10, 10).unwrap();
/// assert_eq!(&png[0..8], &PNG_SIGNATURE);
/// ```
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!(width, height, bytes = bytes.len(), "encoded png");
    Ok(bytes)
}

/// Encode an `ImageSurface` to PNG bytes.
pub fn encode_surface(surface: &ImageSurface) -> Result<Vec<u8>, EncodeError> {
    encode_png(&surface.pixels, surface.width, surface.height)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
