#![forbid(unsafe_code)]

//! Pixel geometry: mapping intersections to pixels and back.
//!
//! All functions here work on the *logical* (unshifted) cell grid. Fuzzy
//! shift offsets are cosmetic and never participate in hit-testing, so a
//! shifted stone still registers at its own intersection.

use smallvec::SmallVec;

use crate::range::AxisRange;
use crate::vertex::Vertex;

/// Divisor for grid line thickness: at vertex size 40 the line is 1px.
pub const GRID_LINE_DIVISOR: f32 = 40.0;

/// Star point radius as a fraction of the vertex size.
pub const HOSHI_RADIUS_FACTOR: f32 = 0.1;

/// Extra margin fraction reserved for fuzzy-shifted stones bleeding out of
/// their nominal cell bounds.
pub const FUZZY_PADDING_FACTOR: f32 = 0.1;

/// A point in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned filled rectangle, used for grid line geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Symmetric padding (in pixels) added around the board surface when fuzzy
/// placement is enabled, so shifted edge stones are not clipped.
#[inline]
#[must_use]
pub fn fuzzy_padding(vertex_size: u32, fuzzy_stone_placement: bool) -> u32 {
    if fuzzy_stone_placement {
        (vertex_size as f32 * FUZZY_PADDING_FACTOR).ceil() as u32
    } else {
        0
    }
}

/// Geometry context shared by both renderers and by interaction handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub vertex_size: u32,
    pub width: u16,
    pub height: u16,
    pub range_x: AxisRange,
    pub range_y: AxisRange,
}

impl BoardGeometry {
    /// Visible column count.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.range_x.len(self.width)
    }

    /// Visible row count.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.range_y.len(self.height)
    }

    /// Whether nothing is visible and rendering should short-circuit.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cols() == 0 || self.rows() == 0
    }

    /// Content surface size in pixels, excluding fuzzy padding.
    #[must_use]
    pub fn surface_size(&self) -> (f32, f32) {
        let vs = self.vertex_size as f32;
        (f32::from(self.cols()) * vs, f32::from(self.rows()) * vs)
    }

    /// Top-left pixel of a vertex's cell, or `None` if it is not visible.
    #[must_use]
    pub fn pixel_origin(&self, vertex: Vertex) -> Option<PixelPoint> {
        let xi = self.range_x.index_of(vertex.x, self.width)?;
        let yi = self.range_y.index_of(vertex.y, self.height)?;
        let vs = self.vertex_size as f32;
        Some(PixelPoint::new(f32::from(xi) * vs, f32::from(yi) * vs))
    }

    /// Unshifted cell center of a vertex, or `None` if it is not visible.
    #[must_use]
    pub fn vertex_center(&self, vertex: Vertex) -> Option<PixelPoint> {
        let half = self.vertex_size as f32 / 2.0;
        self.pixel_origin(vertex)
            .map(|origin| PixelPoint::new(origin.x + half, origin.y + half))
    }

    /// Invert a surface point back to a vertex.
    ///
    /// `point` is in the same coordinate space as the caller's surface;
    /// `origin` is the content top-left in that space (this is where fuzzy
    /// padding offsets are compensated). Cell boundaries belong to the
    /// higher-index cell because the division floors.
    #[must_use]
    pub fn vertex_from_point(&self, point: PixelPoint, origin: PixelPoint) -> Option<Vertex> {
        let rel_x = point.x - origin.x;
        let rel_y = point.y - origin.y;
        if rel_x < 0.0 || rel_y < 0.0 || self.vertex_size == 0 {
            return None;
        }

        let vs = self.vertex_size as f32;
        let gx = (rel_x / vs).floor();
        let gy = (rel_y / vs).floor();
        if gx >= f32::from(self.cols()) || gy >= f32::from(self.rows()) {
            return None;
        }

        let x = self.range_x.coord_at(gx as u16, self.width)?;
        let y = self.range_y.coord_at(gy as u16, self.height)?;
        Some(Vertex::new(x, y))
    }

    /// All vertices covered by a pixel rectangle, in row-major order.
    ///
    /// The corners are normalized first, then the index span is clamped to
    /// the visible range on each axis before enumerating.
    #[must_use]
    pub fn rect_selection(&self, a: PixelPoint, b: PixelPoint) -> Vec<Vertex> {
        let (cols, rows) = (self.cols(), self.rows());
        if cols == 0 || rows == 0 || self.vertex_size == 0 {
            return Vec::new();
        }

        let vs = self.vertex_size as f32;
        let clamp_index = |px: f32, count: u16| -> u16 {
            ((px / vs).floor().max(0.0) as u32).min(u32::from(count - 1)) as u16
        };

        let x0 = clamp_index(a.x.min(b.x), cols);
        let x1 = clamp_index(a.x.max(b.x), cols);
        let y0 = clamp_index(a.y.min(b.y), rows);
        let y1 = clamp_index(a.y.max(b.y), rows);

        let mut out = Vec::new();
        for yi in y0..=y1 {
            for xi in x0..=x1 {
                if let (Some(x), Some(y)) = (
                    self.range_x.coord_at(xi, self.width),
                    self.range_y.coord_at(yi, self.height),
                ) {
                    out.push(Vertex::new(x, y));
                }
            }
        }
        out
    }

    /// Grid line rectangles for the visible window.
    ///
    /// A line ends at the first/last cell center when that cell sits on the
    /// true board edge, and bleeds to the pane edge when the view is a
    /// scrolled sub-rectangle.
    #[must_use]
    pub fn grid_lines(&self) -> SmallVec<[GridLine; 64]> {
        let mut out = SmallVec::new();
        let (cols, rows) = (self.cols(), self.rows());
        if cols == 0 || rows == 0 {
            return out;
        }

        let vs = self.vertex_size as f32;
        let half = vs / 2.0;
        let thickness = vs / GRID_LINE_DIVISOR;

        let at_left = self.range_x.start == 0;
        let at_right = self.range_x.start + cols - 1 == self.width - 1;
        let at_top = self.range_y.start == 0;
        let at_bottom = self.range_y.start + rows - 1 == self.height - 1;

        for i in 0..rows {
            let x = if at_left { half } else { 0.0 };
            let width = if at_right {
                f32::from(2 * cols - 1) * half - x
            } else {
                f32::from(cols) * vs - x
            };
            out.push(GridLine {
                x,
                y: f32::from(2 * i + 1) * half,
                width,
                height: thickness,
            });
        }

        for i in 0..cols {
            let y = if at_top { half } else { 0.0 };
            let height = if at_bottom {
                f32::from(2 * rows - 1) * half - y
            } else {
                f32::from(rows) * vs - y
            };
            out.push(GridLine {
                x: f32::from(2 * i + 1) * half,
                y,
                width: thickness,
                height,
            });
        }

        out
    }
}

/// Star point ("hoshi") positions for a `width × height` board.
///
/// Boards with the smaller dimension ≤ 6 have none. The near offset is 3 for
/// dimensions ≥ 13, else 2. Midpoints and the center appear only on odd
/// dimensions that are not exactly 7.
#[must_use]
pub fn hoshi(width: u16, height: u16) -> Vec<Vertex> {
    if width.min(height) <= 6 {
        return Vec::new();
    }

    let near = |dim: u16| if dim >= 13 { 3 } else { 2 };
    let (near_x, near_y) = (near(width), near(height));
    let (far_x, far_y) = (width - near_x - 1, height - near_y - 1);
    let (middle_x, middle_y) = ((width - 1) / 2, (height - 1) / 2);

    let mut result = vec![
        Vertex::new(near_x, far_y),
        Vertex::new(far_x, near_y),
        Vertex::new(far_x, far_y),
        Vertex::new(near_x, near_y),
    ];

    if width % 2 != 0 && height % 2 != 0 && width != 7 && height != 7 {
        result.push(Vertex::new(middle_x, middle_y));
    }
    if width % 2 != 0 && width != 7 {
        result.push(Vertex::new(middle_x, near_y));
        result.push(Vertex::new(middle_x, far_y));
    }
    if height % 2 != 0 && height != 7 {
        result.push(Vertex::new(near_x, middle_y));
        result.push(Vertex::new(far_x, middle_y));
    }

    result
}
