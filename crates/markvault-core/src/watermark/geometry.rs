//! Tile placement geometry for the rotated watermark grid.
//!
//! Tiles are laid out on a square grid in a *frame* coordinate space which
//! is rotated about a pivot point to obtain surface coordinates.
//!
//! # Coverage
//!
//! With `D = sqrt(width² + height²)` the grid spans `[-D, D)` on both axes.
//! The configured offset moves only the pivot, never the anchors. Any point of the surface lies within
//! `D / 2` of the surface center, so its pre-image under any rotation about
//! the center falls inside that span. Over-covering this way avoids computing
//! a rotated bounding polygon.
//!
//! # Transform
//!
//! Angles are in degrees; positive angles rotate clockwise on the y-down
//! raster. For pivot `p` and rotation θ:
//! ```text
//! surface_x = p.x + (x - p.x) * cos(θ) - (y - p.y) * sin(θ)
//! surface_y = p.y + (x - p.x) * sin(θ) + (y - p.y) * cos(θ)
//! ```

/// One placement point of the watermark grid, in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileAnchor {
    pub x: f64,
    pub y: f64,
}

impl TileAnchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Length of the surface diagonal, used as the half-extent of the tile grid.
pub fn frame_diagonal(width: u32, height: u32) -> f64 {
    (width as f64).hypot(height as f64)
}

/// Number of anchors along one axis: `ceil(2D / gap)`.
///
/// Returns 0 when `gap` is not a positive finite number, since no grid can
/// be formed from it.
pub fn axis_anchor_count(diagonal: f64, gap: f64) -> usize {
    if !gap.is_finite() || gap <= 0.0 || !diagonal.is_finite() || diagonal <= 0.0 {
        return 0;
    }
    (2.0 * diagonal / gap).ceil() as usize
}

/// Anchor positions along one axis: `-D + k * gap` for each `k` below
/// [`axis_anchor_count`].
pub fn axis_anchors(diagonal: f64, gap: f64) -> Vec<f64> {
    (0..axis_anchor_count(diagonal, gap))
        .map(|k| -diagonal + k as f64 * gap)
        .collect()
}

/// All anchors of the tile grid for a `width` x `height` surface.
///
/// Anchors are produced column by column (outer loop over x).
pub fn tile_anchors(width: u32, height: u32, gap: f64) -> Vec<TileAnchor> {
    let diagonal = frame_diagonal(width, height);
    let xs = axis_anchors(diagonal, gap);
    let ys = xs.clone();

    let mut anchors = Vec::with_capacity(xs.len() * ys.len());
    for &x in &xs {
        for &y in &ys {
            anchors.push(TileAnchor::new(x, y));
        }
    }
    anchors
}

/// A rotation about a pivot mapping frame space to surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedFrame {
    pivot_x: f64,
    pivot_y: f64,
    cos: f64,
    sin: f64,
}

impl RotatedFrame {
    /// Frame for a surface, pivoting on its center shifted by the offset.
    pub fn new(width: u32, height: u32, rotation_deg: f64, offset_x: f64, offset_y: f64) -> Self {
        Self::about(
            width as f64 / 2.0 + offset_x,
            height as f64 / 2.0 + offset_y,
            rotation_deg,
        )
    }

    /// Frame rotating by `rotation_deg` about `(pivot_x, pivot_y)`.
    pub fn about(pivot_x: f64, pivot_y: f64, rotation_deg: f64) -> Self {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        Self {
            pivot_x,
            pivot_y,
            cos,
            sin,
        }
    }

    /// The pivot point in surface coordinates.
    pub fn pivot(&self) -> (f64, f64) {
        (self.pivot_x, self.pivot_y)
    }

    /// Rotate a direction vector from frame space into surface space.
    #[inline]
    pub fn rotate_vector(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * self.cos - dy * self.sin, dx * self.sin + dy * self.cos)
    }

    /// Map a frame-space point to surface space.
    ///
    /// Written as a displacement from `(x, y)` so a zero rotation returns
    /// the point bit for bit, wherever the pivot sits.
    #[inline]
    pub fn to_surface(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.pivot_x;
        let dy = y - self.pivot_y;
        let c = self.cos - 1.0;
        (x + dx * c - dy * self.sin, y + dx * self.sin + dy * c)
    }

    /// Map a surface-space point back to frame space.
    #[inline]
    pub fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.pivot_x;
        let dy = y - self.pivot_y;
        let c = self.cos - 1.0;
        (x + dx * c + dy * self.sin, y - dx * self.sin + dy * c)
    }

    /// Surface-space bounding box `(min_x, min_y, max_x, max_y)` of a
    /// frame-space rectangle given relative to `anchor`.
    ///
    /// `left`/`top` are the (non-negative) distances from the anchor to the
    /// rectangle's left and top edges, `right`/`bottom` to the far edges.
    pub fn rect_bounds(
        &self,
        anchor: TileAnchor,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> (f64, f64, f64, f64) {
        let (cx, cy) = self.to_surface(anchor.x, anchor.y);
        let corners = [(-left, -top), (right, -top), (-left, bottom), (right, bottom)];

        let mut bounds = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (dx, dy) in corners {
            let (rx, ry) = self.rotate_vector(dx, dy);
            bounds.0 = bounds.0.min(cx + rx);
            bounds.1 = bounds.1.min(cy + ry);
            bounds.2 = bounds.2.max(cx + rx);
            bounds.3 = bounds.3.max(cy + ry);
        }
        bounds
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
