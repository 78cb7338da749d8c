//! Text rasterization for watermark tiles.
//!
//! The watermark text is rasterized once per pass into a [`TextMask`]: a
//! grid of coverage values in `[0, 1]` together with the point that sits on
//! each tile anchor. Tiles then sample this mask through the rotated frame.
//!
//! Two glyph sources are supported:
//!
//! - [`WatermarkFont::Builtin`]: an embedded 8x8 bitmap font (Basic Latin
//!   and Latin-1, so `©` is available), scaled to the requested pixel size.
//! - [`WatermarkFont::Outline`]: any TrueType/OpenType font, rasterized with
//!   anti-aliasing.

use std::fmt;

use ab_glyph::{point, Font, FontVec, GlyphId, InvalidFont, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{imageops, ImageBuffer, Luma};
use thiserror::Error;
use tracing::warn;

/// Side length of a built-in bitmap glyph in font units.
const BITMAP_GLYPH_SIZE: usize = 8;

/// Masks larger than this many pixels are refused rather than allocated.
const MAX_MASK_PIXELS: usize = 64 * 1024 * 1024;

/// Error returned when outline font data cannot be parsed.
#[derive(Debug, Error)]
#[error("Invalid font data: {0}")]
pub struct FontError(#[from] InvalidFont);

/// The glyph source used to draw watermark text.
#[derive(Default)]
pub enum WatermarkFont {
    /// Embedded 8x8 bitmap font.
    #[default]
    Builtin,
    /// A parsed TrueType/OpenType font.
    Outline(FontVec),
}

impl fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("WatermarkFont::Builtin"),
            Self::Outline(font) => f
                .debug_struct("WatermarkFont::Outline")
                .field("glyphs", &font.glyph_count())
                .finish(),
        }
    }
}

impl WatermarkFont {
    /// Parse an outline font from TTF/OTF bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        Ok(Self::Outline(FontVec::try_from_vec(bytes)?))
    }

    /// Rasterize `text` at `font_size_px`.
    ///
    /// Returns an empty mask for empty text or a non-positive/non-finite size.
    pub fn rasterize(&self, text: &str, font_size_px: f32) -> TextMask {
        if text.is_empty() || !font_size_px.is_finite() || font_size_px <= 0.0 {
            return TextMask::empty();
        }
        match self {
            Self::Builtin => rasterize_bitmap(text, font_size_px),
            Self::Outline(font) => rasterize_outline(font, text, font_size_px),
        }
    }
}

/// Rasterized text coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    /// Mask width in pixels.
    pub width: usize,
    /// Mask height in pixels.
    pub height: usize,
    /// Row-major coverage values in `[0, 1]`.
    pub coverage: Vec<f32>,
    /// Mask-space point placed on the tile anchor (text center).
    pub center_x: f64,
    pub center_y: f64,
}

impl TextMask {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            coverage: Vec::new(),
            center_x: 0.0,
            center_y: 0.0,
        }
    }

    fn blank(width: usize, height: usize) -> Option<Self> {
        let len = width.checked_mul(height)?;
        if len == 0 || len > MAX_MASK_PIXELS {
            warn!(width, height, "watermark text mask size out of range, skipping");
            return None;
        }
        Some(Self {
            width,
            height,
            coverage: vec![0.0; len],
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at integer coordinates; zero outside the mask.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.coverage[y as usize * self.width + x as usize]
    }

    /// Bilinear sample at a mask-space position (pixel centers at `i + 0.5`).
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let x = x - 0.5;
        let y = y - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = (x - x0) as f32;
        let fy = (y - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.get(x0, y0) * (1.0 - fx) + self.get(x0 + 1, y0) * fx;
        let bottom = self.get(x0, y0 + 1) * (1.0 - fx) + self.get(x0 + 1, y0 + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Gaussian-blurred copy, padded by three sigmas on every side.
    ///
    /// The center point moves with the padding so the blurred mask stays
    /// aligned with the original when stamped at the same anchor.
    pub fn blurred(&self, sigma: f32) -> TextMask {
        if self.is_empty() || !sigma.is_finite() || sigma <= 0.0 {
            return self.clone();
        }

        let radius = (3.0 * sigma).ceil() as usize;
        let width = self.width + 2 * radius;
        let height = self.height + 2 * radius;
        let Some(mut out) = TextMask::blank(width, height) else {
            return TextMask::empty();
        };
        let (Ok(buf_width), Ok(buf_height)) = (u32::try_from(width), u32::try_from(height))
        else {
            return TextMask::empty();
        };

        let pad = radius as i64;
        let padded: ImageBuffer<Luma<f32>, Vec<f32>> =
            ImageBuffer::from_fn(buf_width, buf_height, |x, y| {
                Luma([self.get(x as i64 - pad, y as i64 - pad)])
            });
        let blurred = imageops::blur(&padded, sigma);

        out.coverage = blurred.into_raw().into_iter().map(|c| c.clamp(0.0, 1.0)).collect();
        out.center_x = self.center_x + radius as f64;
        out.center_y = self.center_y + radius as f64;
        out
    }
}

/// Look up a bitmap glyph, falling back to `?` for unsupported characters.
fn bitmap_glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn rasterize_bitmap(text: &str, font_size_px: f32) -> TextMask {
    let glyphs: Vec<[u8; 8]> = text.chars().map(bitmap_glyph).collect();
    let scale = font_size_px as f64 / BITMAP_GLYPH_SIZE as f64;

    let width = (glyphs.len() as f64 * BITMAP_GLYPH_SIZE as f64 * scale).ceil() as usize;
    let height = (BITMAP_GLYPH_SIZE as f64 * scale).ceil() as usize;
    let Some(mut mask) = TextMask::blank(width, height) else {
        return TextMask::empty();
    };

    // Nearest-neighbour upscale of the 8x8 cells
    for my in 0..height {
        let row = (((my as f64 + 0.5) / scale) as usize).min(BITMAP_GLYPH_SIZE - 1);
        for mx in 0..width {
            let col = ((mx as f64 + 0.5) / scale) as usize;
            let Some(bits) = glyphs.get(col / BITMAP_GLYPH_SIZE) else {
                continue;
            };
            if (bits[row] >> (col % BITMAP_GLYPH_SIZE)) & 1 == 1 {
                mask.coverage[my * width + mx] = 1.0;
            }
        }
    }
    mask
}

fn rasterize_outline(font: &FontVec, text: &str, font_size_px: f32) -> TextMask {
    let scale = PxScale::from(font_size_px);
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent();
    let line_height = ascent - scaled.descent();

    // Lay out on a baseline at y = ascent, caret starting at x = 0
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    let mut outlined = Vec::new();
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, ascent));
        if let Some(o) = font.outline_glyph(glyph) {
            outlined.push(o);
        }
        caret += scaled.h_advance(id);
        prev = Some(id);
    }

    // Union of the layout box and the ink bounds, so overhangs are kept
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (0.0f32, 0.0f32, caret, line_height);
    for o in &outlined {
        let b = o.px_bounds();
        min_x = min_x.min(b.min.x);
        min_y = min_y.min(b.min.y);
        max_x = max_x.max(b.max.x);
        max_y = max_y.max(b.max.y);
    }
    let origin_x = min_x.floor();
    let origin_y = min_y.floor();
    let width = (max_x - origin_x).ceil().max(0.0) as usize;
    let height = (max_y - origin_y).ceil().max(0.0) as usize;

    let Some(mut mask) = TextMask::blank(width, height) else {
        return TextMask::empty();
    };
    mask.center_x = (caret / 2.0 - origin_x) as f64;
    mask.center_y = (line_height / 2.0 - origin_y) as f64;

    for o in &outlined {
        let b = o.px_bounds();
        let left = (b.min.x - origin_x) as i64;
        let top = (b.min.y - origin_y) as i64;
        o.draw(|x, y, c| {
            let px = left + x as i64;
            let py = top + y as i64;
            if px >= 0 && py >= 0 && (px as usize) < width && (py as usize) < height {
                let cell = &mut mask.coverage[py as usize * width + px as usize];
                *cell = (*cell + c).min(1.0);
            }
        });
    }
    mask
}
