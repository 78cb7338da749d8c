//! Tiled text watermarking.
//!
//! The watermark is a grid of text tiles laid out in a rotated frame that
//! pivots on the surface center shifted by the configured offset. The grid
//! spans twice the surface diagonal on each axis so every surface pixel is
//! reachable from some tile at any rotation angle.
//!
//! Each tile is drawn with a soft drop shadow underneath, matching the look
//! of canvas text with `shadowBlur = 4` and a half-transparent black shadow.
//!
//! # Example
//!
//! ```ignore
//! use markvault_core::{apply_watermark, ImageSurface, WatermarkConfig};
//!
//! let mut surface = ImageSurface::filled(200, 200, [40, 40, 40, 255]);
//! let config = WatermarkConfig {
//!     text: "TEST".into(),
//!     rotation_deg: 0.0,
//!     ..Default::default()
//! };
//! apply_watermark(&mut surface, &config);
//! ```

mod geometry;
mod stamp;
mod text;

pub use geometry::{
    axis_anchor_count, axis_anchors, frame_diagonal, tile_anchors, RotatedFrame, TileAnchor,
};
pub use text::{FontError, TextMask, WatermarkFont};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Rgb;
use crate::surface::ImageSurface;
use stamp::{stamp_mask, Stamp};

/// Shadow color drawn beneath every tile.
pub const SHADOW_COLOR: Rgb = Rgb::black();

/// Shadow alpha before the watermark opacity is applied.
pub const SHADOW_ALPHA: f32 = 0.5;

/// Shadow offset in surface pixels. Not rotated with the text.
pub const SHADOW_OFFSET: (f64, f64) = (2.0, 2.0);

/// Gaussian sigma of the shadow blur (a blur radius of 4).
pub const SHADOW_BLUR_SIGMA: f32 = 2.0;

/// Passes needing more tiles than this are skipped.
const MAX_TILES: usize = 1 << 20;

/// Parameters for one watermark pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatermarkConfig {
    /// Text drawn on each tile. Empty disables the watermark.
    pub text: String,
    /// Global alpha for the text and its shadow (0.0 to 1.0)
    pub opacity: f32,
    /// Font size in pixels
    pub font_size_px: f32,
    /// Text color
    pub color: Rgb,
    /// Tile pitch on both axes, in pixels
    pub gap_px: f64,
    /// Grid rotation in degrees, positive is clockwise
    pub rotation_deg: f64,
    /// Horizontal shift of the rotation pivot
    pub offset_x: f64,
    /// Vertical shift of the rotation pivot
    pub offset_y: f64,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: "\u{a9} 2025".to_string(),
            opacity: 0.3,
            font_size_px: 32.0,
            color: Rgb::white(),
            gap_px: 100.0,
            rotation_deg: -45.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl WatermarkConfig {
    /// Whether this config draws anything at all.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Draw the watermark with the built-in bitmap font.
pub fn apply_watermark(surface: &mut ImageSurface, config: &WatermarkConfig) {
    apply_watermark_with_font(surface, config, &WatermarkFont::Builtin);
}

/// Draw the watermark onto `surface` in place using `font`.
///
/// Does nothing when the text is empty. A gap that yields no tiles (or an
/// unreasonable number of them) skips the pass with a warning.
pub fn apply_watermark_with_font(
    surface: &mut ImageSurface,
    config: &WatermarkConfig,
    font: &WatermarkFont,
) {
    if !config.is_active() || surface.is_empty() {
        return;
    }

    let diagonal = frame_diagonal(surface.width, surface.height);
    let per_axis = axis_anchor_count(diagonal, config.gap_px);
    if per_axis == 0 {
        warn!(gap_px = config.gap_px, "watermark gap yields no tiles, skipping");
        return;
    }
    if per_axis.saturating_mul(per_axis) > MAX_TILES {
        warn!(
            gap_px = config.gap_px,
            per_axis,
            "watermark gap yields too many tiles, skipping"
        );
        return;
    }
    let anchors = tile_anchors(surface.width, surface.height, config.gap_px);

    let mask = font.rasterize(&config.text, config.font_size_px);
    if mask.is_empty() {
        warn!(
            font_size_px = config.font_size_px,
            "watermark text rasterized to nothing, skipping"
        );
        return;
    }
    let shadow = mask.blurred(SHADOW_BLUR_SIGMA);

    let frame = RotatedFrame::new(
        surface.width,
        surface.height,
        config.rotation_deg,
        config.offset_x,
        config.offset_y,
    );
    let shadow_stamp = Stamp {
        color: SHADOW_COLOR,
        alpha: config.opacity * SHADOW_ALPHA,
        shift_x: SHADOW_OFFSET.0,
        shift_y: SHADOW_OFFSET.1,
    };
    let text_stamp = Stamp {
        color: config.color,
        alpha: config.opacity,
        shift_x: 0.0,
        shift_y: 0.0,
    };

    let mut drawn = 0usize;
    for &anchor in &anchors {
        stamp_mask(surface, &frame, anchor, &shadow, shadow_stamp);
        if stamp_mask(surface, &frame, anchor, &mask, text_stamp) {
            drawn += 1;
        }
    }

    debug!(
        width = surface.width,
        height = surface.height,
        anchors = anchors.len(),
        drawn,
        "applied watermark"
    );
}
