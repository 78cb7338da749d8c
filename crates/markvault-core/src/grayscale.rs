//! In-place grayscale conversion.
//!
//! Every pixel's color channels are replaced by its BT.601 luminance,
//! truncated to an integer. Alpha is never touched. Because gray input
//! maps to itself the conversion is idempotent.

use crate::luminance::calculate_luminance_u8;
use crate::surface::{ImageSurface, CHANNELS};

/// Convert a surface to grayscale in place.
///
/// # Example
/// ```
/// use markvault_core::{grayscale::to_grayscale, ImageSurface};
///
/// let mut surface = ImageSurface::filled(2, 2, [255, 0, 0, 255]);
/// to_grayscale(&mut surface);
/// assert_eq!(surface.pixel(0, 0), Some([76, 76, 76, 255]));
/// ```
pub fn to_grayscale(surface: &mut ImageSurface) {
    to_grayscale_pixels(&mut surface.pixels);
}

/// Convert raw RGBA pixel data to grayscale in place.
///
/// Trailing bytes that do not form a complete pixel are left unchanged.
pub fn to_grayscale_pixels(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let lum = calculate_luminance_u8(chunk[0], chunk[1], chunk[2]);
        chunk[0] = lum;
        chunk[1] = lum;
        chunk[2] = lum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_surface_becomes_76() {
        let mut surface = ImageSurface::filled(100, 100, [255, 0, 0, 255]);
        to_grayscale(&mut surface);

        for chunk in surface.pixels.chunks_exact(4) {
            assert_eq!(chunk, &[76, 76, 76, 255]);
        }
    }

    #[test]
    fn test_primaries() {
        let mut pixels = vec![
            0, 255, 0, 255, // Green
            0, 0, 255, 255, // Blue
            255, 255, 255, 255, // White
            0, 0, 0, 255, // Black
        ];
        to_grayscale_pixels(&mut pixels);

        assert_eq!(&pixels[0..4], &[149, 149, 149, 255]);
        assert_eq!(&pixels[4..8], &[29, 29, 29, 255]);
        assert_eq!(&pixels[8..12], &[255, 255, 255, 255]);
        assert_eq!(&pixels[12..16], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_is_preserved() {
        let mut pixels = vec![200, 100, 50, 0, 200, 100, 50, 128];
        to_grayscale_pixels(&mut pixels);

        assert_eq!(pixels[3], 0);
        assert_eq!(pixels[7], 128);
        // 0.299*200 + 0.587*100 + 0.114*50 = 124.2
        assert_eq!(&pixels[0..3], &[124, 124, 124]);
    }

    #[test]
    fn test_partial_trailing_pixel_untouched() {
        let mut pixels = vec![255, 0, 0, 255, 10, 20];
        to_grayscale_pixels(&mut pixels);
        assert_eq!(&pixels[4..], &[10, 20]);
    }

    #[test]
    fn test_empty_buffer() {
        let mut pixels: Vec<u8> = vec![];
        to_grayscale_pixels(&mut pixels);
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_double_application_does_not_darken() {
        let mut once = ImageSurface::filled(4, 4, [123, 45, 210, 255]);
        to_grayscale(&mut once);
        let mut twice = once.clone();
        to_grayscale(&mut twice);
        assert_eq!(once, twice);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
