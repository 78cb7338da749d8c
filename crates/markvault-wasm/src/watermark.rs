//! Watermark configuration bindings.
//!
//! `JsWatermarkConfig` mirrors the core `WatermarkConfig` with a getter and
//! setter per field, so the UI can bind its controls directly.

use crate::types::JsImageSurface;
use markvault_core::{parse_color, WatermarkConfig};
use wasm_bindgen::prelude::*;

/// Watermark parameters for JavaScript.
#[wasm_bindgen]
pub struct JsWatermarkConfig {
    inner: WatermarkConfig,
}

#[wasm_bindgen]
impl JsWatermarkConfig {
    /// Create a config with the editor defaults.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: WatermarkConfig::default(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_text(&mut self, value: String) {
        self.inner.text = value;
    }

    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.inner.opacity
    }

    #[wasm_bindgen(setter)]
    pub fn set_opacity(&mut self, value: f32) {
        self.inner.opacity = value;
    }

    #[wasm_bindgen(getter)]
    pub fn font_size_px(&self) -> f32 {
        self.inner.font_size_px
    }

    #[wasm_bindgen(setter)]
    pub fn set_font_size_px(&mut self, value: f32) {
        self.inner.font_size_px = value;
    }

    /// Text color as `#rrggbb`
    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        self.inner.color.to_hex()
    }

    /// Set the text color from `#rgb`, `#rrggbb` or a CSS color name.
    pub fn set_color(&mut self, value: &str) -> Result<(), JsValue> {
        self.inner.color = parse_color(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn gap_px(&self) -> f64 {
        self.inner.gap_px
    }

    #[wasm_bindgen(setter)]
    pub fn set_gap_px(&mut self, value: f64) {
        self.inner.gap_px = value;
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_deg(&self) -> f64 {
        self.inner.rotation_deg
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotation_deg(&mut self, value: f64) {
        self.inner.rotation_deg = value;
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.offset_x
    }

    #[wasm_bindgen(setter)]
    pub fn set_offset_x(&mut self, value: f64) {
        self.inner.offset_x = value;
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.offset_y
    }

    #[wasm_bindgen(setter)]
    pub fn set_offset_y(&mut self, value: f64) {
        self.inner.offset_y = value;
    }

    /// Whether the config would draw anything (non-empty text).
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; missing fields take defaults
    pub fn from_json(value: JsValue) -> Result<JsWatermarkConfig, JsValue> {
        let inner: WatermarkConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsWatermarkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl JsWatermarkConfig {
    pub(crate) fn inner(&self) -> &WatermarkConfig {
        &self.inner
    }
}

/// Draw the watermark onto a copy of `surface` with the built-in font.
#[wasm_bindgen]
pub fn apply_watermark(surface: &JsImageSurface, config: &JsWatermarkConfig) -> JsImageSurface {
    let mut out = surface.to_surface();
    markvault_core::apply_watermark(&mut out, config.inner());
    JsImageSurface::from_surface(out)
}

/// Convert a copy of `surface` to grayscale.
#[wasm_bindgen]
pub fn to_grayscale(surface: &JsImageSurface) -> JsImageSurface {
    let mut out = surface.to_surface();
    markvault_core::to_grayscale(&mut out);
    JsImageSurface::from_surface(out)
}
