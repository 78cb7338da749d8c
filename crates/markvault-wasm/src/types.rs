//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core MarkVault types and handle the conversion
//! between Rust and JavaScript data representations.

use markvault_core::ImageSurface;
use wasm_bindgen::prelude::*;

/// An RGBA image surface for JavaScript.
///
/// The pixel layout matches canvas `ImageData`: 4 bytes per pixel, row-major,
/// so `new ImageData(new Uint8ClampedArray(surface.pixels()), surface.width)`
/// draws it directly.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out to a
/// JavaScript `Uint8Array`.
#[wasm_bindgen]
pub struct JsImageSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImageSurface {
    /// Create a surface from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImageSurface {
        JsImageSurface {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImageSurface {
    pub(crate) fn from_surface(surface: ImageSurface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixels: surface.pixels,
        }
    }

    /// Convert back to a core surface. Clones the pixel data.
    pub(crate) fn to_surface(&self) -> ImageSurface {
        ImageSurface {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}
