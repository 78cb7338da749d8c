//! Compositing a text mask onto the surface at one tile anchor.

use super::geometry::{RotatedFrame, TileAnchor};
use super::text::TextMask;
use crate::color::Rgb;
use crate::surface::ImageSurface;

/// Where and how to composite one mask.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stamp {
    pub color: Rgb,
    pub alpha: f32,
    /// Unrotated translation in surface pixels.
    pub shift_x: f64,
    pub shift_y: f64,
}

/// Composite `mask` centered on `anchor` (frame space) onto `surface`.
///
/// Every surface pixel inside the tile's rotated bounding box is mapped back
/// through `frame` into mask space and sampled bilinearly, then blended with
/// `stamp.alpha` scaled by the sampled coverage.
///
/// Returns `true` when the tile touched the surface.
pub(crate) fn stamp_mask(
    surface: &mut ImageSurface,
    frame: &RotatedFrame,
    anchor: TileAnchor,
    mask: &TextMask,
    stamp: Stamp,
) -> bool {
    if mask.is_empty() {
        return false;
    }

    let (min_x, min_y, max_x, max_y) = frame.rect_bounds(
        anchor,
        mask.center_x,
        mask.center_y,
        mask.width as f64 - mask.center_x,
        mask.height as f64 - mask.center_y,
    );

    // One pixel of slack on each side for the bilinear footprint
    let x0 = (min_x + stamp.shift_x - 1.0).floor().max(0.0);
    let y0 = (min_y + stamp.shift_y - 1.0).floor().max(0.0);
    let x1 = (max_x + stamp.shift_x + 1.0).ceil().min(surface.width as f64);
    let y1 = (max_y + stamp.shift_y + 1.0).ceil().min(surface.height as f64);
    if x0 >= x1 || y0 >= y1 {
        return false;
    }

    for py in y0 as u32..y1 as u32 {
        for px in x0 as u32..x1 as u32 {
            let sx = px as f64 + 0.5 - stamp.shift_x;
            let sy = py as f64 + 0.5 - stamp.shift_y;
            let (fx, fy) = frame.to_frame(sx, sy);
            let coverage = mask.sample(
                fx - anchor.x + mask.center_x,
                fy - anchor.y + mask.center_y,
            );
            if coverage > 0.0 {
                surface.blend_pixel(px, py, stamp.color, stamp.alpha * coverage);
            }
        }
    }
    true
}
