//! Render pipeline bindings.
//!
//! # Example
//!
//! ```typescript
//! import { render_image, JsWatermarkConfig, output_file_name } from '@markvault/wasm';
//!
//! const config = new JsWatermarkConfig();
//! config.text = 'TEST';
//! const output = render_image(bytes, true, config);
//! const blob = new Blob([output.bytes()], { type: 'image/png' });
//! download(blob, output_file_name());
//! ```

use crate::watermark::JsWatermarkConfig;
use markvault_core::{pipeline, ProcessedOutput};
use wasm_bindgen::prelude::*;

/// A rendered PNG for JavaScript.
#[wasm_bindgen]
pub struct JsRenderOutput {
    inner: ProcessedOutput,
}

#[wasm_bindgen]
impl JsRenderOutput {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Size of the PNG in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// The PNG bytes, copied into a new `Uint8Array`.
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.bytes.as_slice())
    }

    /// Suggested download file name
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        pipeline::OUTPUT_FILE_NAME.to_string()
    }
}

impl JsRenderOutput {
    pub(crate) fn from_output(inner: ProcessedOutput) -> Self {
        Self { inner }
    }

    #[cfg(test)]
    pub(crate) fn png(&self) -> &[u8] {
        &self.inner.bytes
    }
}

/// Decode `source`, optionally convert to grayscale, watermark, and encode
/// to PNG.
///
/// Each call starts from `source`, so calling again with new settings never
/// stacks effects.
///
/// # Errors
///
/// Throws if `source` cannot be decoded or the result cannot be encoded.
#[wasm_bindgen]
pub fn render_image(
    source: &[u8],
    grayscale: bool,
    watermark: &JsWatermarkConfig,
) -> Result<JsRenderOutput, JsValue> {
    pipeline::render(source, grayscale, watermark.inner())
        .map(JsRenderOutput::from_output)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// File name for the exported image.
#[wasm_bindgen]
pub fn output_file_name() -> String {
    pipeline::OUTPUT_FILE_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use markvault_core::{encode_surface, ImageSurface};

    #[test]
    fn test_render_image_grayscale() {
        let source = encode_surface(&ImageSurface::filled(10, 10, [255, 0, 0, 255])).unwrap();
        let mut config = JsWatermarkConfig::new();
        config.set_text(String::new());

        let output = render_image(&source, true, &config).unwrap();
        assert_eq!((output.width(), output.height()), (10, 10));
        assert_eq!(output.file_name(), "markvault-protected.png");

        let expected = encode_surface(&ImageSurface::filled(10, 10, [76, 76, 76, 255])).unwrap();
        assert_eq!(output.png(), expected.as_slice());
        assert_eq!(output.byte_length(), expected.len());
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(), "markvault-protected.png");
    }
}
