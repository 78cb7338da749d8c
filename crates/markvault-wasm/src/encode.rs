//! PNG encoding bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_surface`] - Encode a JsImageSurface to PNG bytes

use crate::types::JsImageSurface;
use markvault_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Throws if the pixel data length doesn't match `width * height * 4` or
/// either dimension is zero.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsImageSurface to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_surface(surface: &JsImageSurface) -> Result<Vec<u8>, JsValue> {
    encode::encode_surface(&surface.to_surface()).map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_wrong_length() {
        let err = encode_png(&[0u8; 10], 2, 2).unwrap_err();
        assert!(err.as_string().unwrap().contains("Invalid pixel data"));
    }
}
