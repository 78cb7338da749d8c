//! Editor settings as exposed to the UI.
//!
//! [`EditorSettings`] is the full configuration surface of the editor: the
//! grayscale toggle, the watermark toggle and every watermark parameter.
//! Values outside the documented slider ranges are not rejected by the
//! pipeline; [`EditorSettings::validate`] reports them for callers that care.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::watermark::WatermarkConfig;

pub const OPACITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const FONT_SIZE_RANGE: RangeInclusive<f64> = 12.0..=72.0;
pub const GAP_RANGE: RangeInclusive<f64> = 50.0..=300.0;
pub const ROTATION_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const OFFSET_RANGE: RangeInclusive<f64> = -200.0..=200.0;

/// A setting outside its documented range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside the range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Editor configuration with the UI's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// Convert to grayscale before watermarking
    pub grayscale: bool,
    /// Draw the watermark
    pub watermark_enabled: bool,
    /// Watermark text
    pub text: String,
    /// Watermark opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Font size in pixels (12 to 72)
    pub font_size_px: f32,
    /// Watermark text color
    pub color: Rgb,
    /// Tile pitch in pixels (50 to 300)
    pub gap_px: f64,
    /// Rotation in degrees (-90 to 90)
    pub rotation_deg: f64,
    /// Horizontal offset in pixels (-200 to 200)
    pub offset_x: f64,
    /// Vertical offset in pixels (-200 to 200)
    pub offset_y: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let watermark = WatermarkConfig::default();
        Self {
            grayscale: false,
            watermark_enabled: false,
            text: watermark.text,
            opacity: watermark.opacity,
            font_size_px: watermark.font_size_px,
            color: watermark.color,
            gap_px: watermark.gap_px,
            rotation_deg: watermark.rotation_deg,
            offset_x: watermark.offset_x,
            offset_y: watermark.offset_y,
        }
    }
}

impl EditorSettings {
    /// Watermark parameters, regardless of whether the watermark is enabled.
    pub fn watermark(&self) -> WatermarkConfig {
        WatermarkConfig {
            text: self.text.clone(),
            opacity: self.opacity,
            font_size_px: self.font_size_px,
            color: self.color,
            gap_px: self.gap_px,
            rotation_deg: self.rotation_deg,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }

    /// The watermark to draw, or `None` when disabled or the text is empty.
    pub fn effective_watermark(&self) -> Option<WatermarkConfig> {
        if !self.watermark_enabled {
            return None;
        }
        Some(self.watermark()).filter(WatermarkConfig::is_active)
    }

    /// Check every numeric setting against its documented range.
    ///
    /// Returns the first field found out of range. NaN is always out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("opacity", self.opacity as f64, &OPACITY_RANGE)?;
        check("fontSizePx", self.font_size_px as f64, &FONT_SIZE_RANGE)?;
        check("gapPx", self.gap_px, &GAP_RANGE)?;
        check("rotationDeg", self.rotation_deg, &ROTATION_RANGE)?;
        check("offsetX", self.offset_x, &OFFSET_RANGE)?;
        check("offsetY", self.offset_y, &OFFSET_RANGE)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
