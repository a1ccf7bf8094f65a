#![forbid(unsafe_code)]

//! The shared renderer input contract.
//!
//! Both backends consume exactly one type, [`BoardView`]: a borrowed bundle
//! of the position, overlay grids, animation sets, and display parameters.
//! Overlay grids are optional and may be smaller than the board; missing
//! cells read as "no feature there".

use ahash::AHashSet;

use goban_core::geometry::{BoardGeometry, HOSHI_RADIUS_FACTOR, PixelPoint};
use goban_core::grid::{Grid, SignMap};
use goban_core::marks::{GhostStone, HeatVertex, LineMarker, Marker};
use goban_core::range::AxisRange;
use goban_core::shift::{RandomMap, ShiftMap};
use goban_core::sign::Sign;
use goban_core::vertex::Vertex;

/// Optional per-intersection overlay grids.
pub type MarkerMap = Grid<Option<Marker>>;
pub type GhostMap = Grid<Option<GhostStone>>;
pub type HeatMap = Grid<Option<HeatVertex>>;
/// Paint strengths in `[-1, 1]`; sign selects the color, zero means unpainted.
pub type PaintMap = Grid<f32>;

/// Everything a backend needs to paint one frame. Borrowed, cheap to build.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub position: &'a SignMap,
    pub marker_map: Option<&'a MarkerMap>,
    pub ghost_map: Option<&'a GhostMap>,
    pub heat_map: Option<&'a HeatMap>,
    pub paint_map: Option<&'a PaintMap>,
    pub shift_map: &'a ShiftMap,
    pub random_map: &'a RandomMap,
    pub selected: &'a [Vertex],
    pub dimmed: &'a [Vertex],
    pub placed: &'a [Vertex],
    pub shifting: &'a [Vertex],
    pub lines: &'a [LineMarker],
    pub hoshis: &'a [Vertex],
    pub vertex_size: u32,
    pub range_x: AxisRange,
    pub range_y: AxisRange,
    pub fuzzy_stone_placement: bool,
}

impl BoardView<'_> {
    /// Geometry context for this view.
    #[must_use]
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry {
            vertex_size: self.vertex_size,
            width: self.position.width(),
            height: self.position.height(),
            range_x: self.range_x,
            range_y: self.range_y,
        }
    }

    /// Sign at a vertex, out-of-bounds reading as empty.
    #[inline]
    #[must_use]
    pub fn sign(&self, vertex: Vertex) -> Sign {
        self.position.sign(vertex)
    }

    /// Marker at a vertex, if the marker grid covers it.
    #[must_use]
    pub fn marker(&self, vertex: Vertex) -> Option<&Marker> {
        self.marker_map.and_then(|map| map.feature(vertex))
    }

    /// Ghost stone at a vertex, if the ghost grid covers it.
    #[must_use]
    pub fn ghost(&self, vertex: Vertex) -> Option<&GhostStone> {
        self.ghost_map.and_then(|map| map.feature(vertex))
    }

    /// Heat value at a vertex, if the heat grid covers it.
    #[must_use]
    pub fn heat(&self, vertex: Vertex) -> Option<&HeatVertex> {
        self.heat_map.and_then(|map| map.feature(vertex))
    }

    /// Paint strength at signed coordinates; off-grid probes read as zero.
    #[inline]
    #[must_use]
    pub fn paint_at(&self, x: i32, y: i32) -> f32 {
        self.paint_map
            .and_then(|map| map.get_signed(x, y))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Hash-set form of the view's vertex lists, built once per render pass so
/// membership checks are O(1) while the view itself stays plain slices.
#[derive(Debug, Default)]
pub struct VertexSets {
    pub selected: AHashSet<Vertex>,
    pub dimmed: AHashSet<Vertex>,
    pub placed: AHashSet<Vertex>,
    pub shifting: AHashSet<Vertex>,
}

impl VertexSets {
    #[must_use]
    pub fn from_view(view: &BoardView<'_>) -> Self {
        Self {
            selected: view.selected.iter().copied().collect(),
            dimmed: view.dimmed.iter().copied().collect(),
            placed: view.placed.iter().copied().collect(),
            shifting: view.shifting.iter().copied().collect(),
        }
    }

    /// Whether a stone at this vertex is baked into the static layer. Placed,
    /// shifting, and dimmed stones render as overlay instead.
    #[must_use]
    pub fn stone_is_static(&self, vertex: Vertex) -> bool {
        !self.placed.contains(&vertex)
            && !self.shifting.contains(&vertex)
            && !self.dimmed.contains(&vertex)
    }
}

/// A star point ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoshiPoint {
    pub center: PixelPoint,
    pub radius: f32,
}

/// Star points positioned within the visible window. Centers carry a half
/// pixel nudge so the disc edge lands on a pixel boundary at common sizes.
#[must_use]
pub fn hoshi_points(geometry: &BoardGeometry, hoshis: &[Vertex]) -> Vec<HoshiPoint> {
    let radius = HOSHI_RADIUS_FACTOR * geometry.vertex_size as f32;
    hoshis
        .iter()
        .filter_map(|&vertex| geometry.vertex_center(vertex))
        .map(|center| HoshiPoint {
            center: PixelPoint::new(center.x + 0.5, center.y + 0.5),
            radius,
        })
        .collect()
}
