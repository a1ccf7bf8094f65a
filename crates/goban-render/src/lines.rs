#![forbid(unsafe_code)]

//! Line and arrow annotation geometry.
//!
//! Annotations live in full-board pixel space and are translated by the
//! visible-range offset, so a line whose endpoint sits outside the visible
//! window still draws its visible portion. They are always topmost and
//! pointer-transparent; endpoints use unshifted cell centers.

use goban_core::geometry::PixelPoint;
use goban_core::marks::{LineKind, LineMarker};
use goban_core::range::AxisRange;
use goban_core::vertex::Vertex;

/// Stroke width as a fraction of the vertex size.
pub const LINE_THICKNESS_FACTOR: f32 = 0.08;

/// Arrowhead wing length as a fraction of the vertex size.
pub const ARROWHEAD_FACTOR: f32 = 0.3;

/// Angle between the shaft and each arrowhead wing, radians.
const ARROWHEAD_ANGLE: f32 = 0.5236;

/// One annotation ready to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub start: PixelPoint,
    pub end: PixelPoint,
    pub thickness: f32,
    pub kind: LineKind,
    /// Wing endpoints for arrows; both segments share `end` as their tip.
    pub arrowhead: Option<[PixelPoint; 2]>,
}

/// Full-board center of a vertex shifted into visible-window space.
fn center(vertex: Vertex, vertex_size: f32, range_x: AxisRange, range_y: AxisRange) -> PixelPoint {
    PixelPoint::new(
        (f32::from(vertex.x) + 0.5 - f32::from(range_x.start)) * vertex_size,
        (f32::from(vertex.y) + 0.5 - f32::from(range_y.start)) * vertex_size,
    )
}

/// Resolve annotation markers to pixel shapes. Degenerate (zero-length)
/// markers are dropped.
#[must_use]
pub fn line_shapes(
    markers: &[LineMarker],
    vertex_size: u32,
    range_x: AxisRange,
    range_y: AxisRange,
) -> Vec<LineShape> {
    let vs = vertex_size as f32;
    markers
        .iter()
        .filter(|marker| marker.v1 != marker.v2)
        .map(|marker| {
            let start = center(marker.v1, vs, range_x, range_y);
            let end = center(marker.v2, vs, range_x, range_y);
            let arrowhead = (marker.kind == LineKind::Arrow).then(|| {
                let angle = (end.y - start.y).atan2(end.x - start.x);
                let length = ARROWHEAD_FACTOR * vs;
                let wing = |side: f32| {
                    let theta = angle + std::f32::consts::PI + side * ARROWHEAD_ANGLE;
                    PixelPoint::new(
                        end.x + length * theta.cos(),
                        end.y + length * theta.sin(),
                    )
                };
                [wing(-1.0), wing(1.0)]
            });
            LineShape {
                start,
                end,
                thickness: LINE_THICKNESS_FACTOR * vs,
                kind: marker.kind,
                arrowhead,
            }
        })
        .collect()
}
