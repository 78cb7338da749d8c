//! Upload validation and image decoding bindings.
//!
//! # Functions
//!
//! - [`check_upload`] - Validate a file's MIME type and size before reading it
//! - [`decode_image`] - Decode JPEG, PNG, GIF or WebP bytes to an RGBA surface
//!
//! # Example
//!
//! ```typescript
//! import { check_upload, decode_image } from '@markvault/wasm';
//!
//! check_upload(file.type, file.size); // throws on rejection
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const surface = decode_image(bytes);
//! console.log(`Decoded ${surface.width}x${surface.height}`);
//! ```

use crate::types::JsImageSurface;
use markvault_core::{decode, intake};
use wasm_bindgen::prelude::*;

/// Validate an upload before reading its contents.
///
/// # Errors
///
/// Throws if the MIME type is not one of `image/jpeg`, `image/png`,
/// `image/gif`, `image/webp`, `image/svg+xml`, or if the file is larger
/// than 10 MiB.
#[wasm_bindgen]
pub fn check_upload(content_type: &str, byte_len: usize) -> Result<(), JsValue> {
    intake::check_upload(content_type, byte_len)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Largest accepted upload in bytes.
#[wasm_bindgen]
pub fn max_upload_bytes() -> usize {
    intake::MAX_UPLOAD_BYTES
}

/// Decode image bytes at their natural size, applying EXIF orientation.
///
/// # Errors
///
/// Throws if the bytes are empty, not a recognized raster format, SVG, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImageSurface, JsValue> {
    decode::decode_image(bytes)
        .map(JsImageSurface::from_surface)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
