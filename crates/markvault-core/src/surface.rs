//! The RGBA working surface shared by every stage of the render pipeline.

use crate::color::Rgb;

/// Number of interleaved samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A rectangular RGBA pixel buffer.
///
/// Samples are interleaved `[r, g, b, a]`, row-major, top to bottom.
/// The buffer length is always `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSurface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl ImageSurface {
    /// Create a surface from existing RGBA pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a surface filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a surface from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage`.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid surface.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Byte offset of the pixel at `(x, y)`, or `None` when out of bounds.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Read the RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Composite a solid color over the pixel at `(x, y)` with source-over blending.
    ///
    /// `alpha` is the coverage-weighted source alpha. Values above 1 act as 1;
    /// zero, negative and NaN values leave the pixel untouched.
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgb, alpha: f32) {
        if alpha.is_nan() || alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        let Some(i) = self.offset(x, y) else {
            return;
        };

        let inv = 1.0 - alpha;
        let dst_a = self.pixels[i + 3] as f32 / 255.0;
        let out_a = alpha + dst_a * inv;

        // Premultiplied source-over, then un-premultiply for storage
        let blend = |src: u8, dst: u8| -> u8 {
            if out_a <= f32::EPSILON {
                return 0;
            }
            let v = (src as f32 * alpha + dst as f32 * dst_a * inv) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        self.pixels[i] = blend(color.r, self.pixels[i]);
        self.pixels[i + 1] = blend(color.g, self.pixels[i + 1]);
        self.pixels[i + 2] = blend(color.b, self.pixels[i + 2]);
        self.pixels[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_creation() {
        let surface = ImageSurface::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(surface.width, 100);
        assert_eq!(surface.height, 50);
        assert_eq!(surface.pixel_count(), 5000);
        assert_eq!(surface.byte_size(), 20000);
        assert!(!surface.is_empty());
    }

    #[test]
    fn test_surface_empty() {
        let surface = ImageSurface::new(0, 0, vec![]);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_filled_surface() {
        let surface = ImageSurface::filled(3, 2, [10, 20, 30, 40]);
        assert_eq!(surface.byte_size(), 24);
        assert_eq!(surface.pixel(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(surface.pixel(3, 0), None);
        assert_eq!(surface.pixel(0, 2), None);
    }

    #[test]
    fn test_rgba_image_roundtrip_keeps_layout() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([1, 2, 3, 4]));

        let surface = ImageSurface::from_rgba_image(img);
        assert_eq!(surface.pixel(1, 0), Some([1, 2, 3, 4]));

        let back = surface.to_rgba_image().unwrap();
        assert_eq!(back.get_pixel(1, 0).0, [1, 2, 3, 4]);
    }

    #[test]
    fn test_blend_opaque_source_replaces_color() {
        let mut surface = ImageSurface::filled(1, 1, [0, 0, 0, 255]);
        surface.blend_pixel(0, 0, Rgb::new(255, 128, 0), 1.0);
        assert_eq!(surface.pixel(0, 0), Some([255, 128, 0, 255]));
    }

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        let mut surface = ImageSurface::filled(1, 1, [0, 0, 0, 255]);
        surface.blend_pixel(0, 0, Rgb::new(200, 100, 50), 0.5);
        assert_eq!(surface.pixel(0, 0), Some([100, 50, 25, 255]));
    }

    #[test]
    fn test_blend_over_transparent_takes_source_color() {
        let mut surface = ImageSurface::filled(1, 1, [0, 0, 0, 0]);
        surface.blend_pixel(0, 0, Rgb::new(255, 255, 255), 0.3);
        let px = surface.pixel(0, 0).unwrap();
        assert_eq!(&px[..3], &[255, 255, 255]);
        assert_eq!(px[3], 77); // 0.3 * 255 rounded
    }

    #[test]
    fn test_blend_zero_alpha_is_noop() {
        let mut surface = ImageSurface::filled(1, 1, [9, 8, 7, 6]);
        surface.blend_pixel(0, 0, Rgb::new(255, 255, 255), 0.0);
        surface.blend_pixel(0, 0, Rgb::new(255, 255, 255), -2.0);
        surface.blend_pixel(0, 0, Rgb::new(255, 255, 255), f32::NAN);
        assert_eq!(surface.pixel(0, 0), Some([9, 8, 7, 6]));
    }

    #[test]
    fn test_blend_out_of_bounds_is_ignored() {
        let mut surface = ImageSurface::filled(2, 2, [1, 1, 1, 255]);
        let before = surface.clone();
        surface.blend_pixel(2, 0, Rgb::new(255, 0, 0), 1.0);
        surface.blend_pixel(0, 5, Rgb::new(255, 0, 0), 1.0);
        assert_eq!(surface, before);
    }
}
