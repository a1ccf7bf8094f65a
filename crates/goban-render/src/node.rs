#![forbid(unsafe_code)]

//! Retained per-intersection node construction, shared by both backends.
//!
//! A [`VertexNode`] is the full description of one intersection: occupancy,
//! cosmetic shift, texture variant, animation flags, and every overlay
//! feature including the neighbor-join data for paint and selection. The
//! retained backend builds one per visible intersection; the canvas backend
//! builds them only for intersections the partitioner flags.

use goban_core::marks::{GhostStone, HeatVertex, Marker};
use goban_core::sign::Sign;
use goban_core::vertex::Vertex;

use crate::view::{BoardView, VertexSets};

/// Which orthogonal neighbors share a feature, so the shared edge renders
/// merged instead of doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeJoins {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeJoins {
    #[inline]
    #[must_use]
    pub const fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// The paint overlay for one intersection.
///
/// Present whenever the intersection or any orthogonal neighbor is painted:
/// unpainted neighbors still host the corner fills that square off a 2x2
/// painted block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintLayer {
    /// The intersection's own paint color, if painted.
    pub sign: Option<Sign>,
    /// Edges merged with same-signed painted neighbors. All false when the
    /// intersection itself is unpainted.
    pub joins: EdgeJoins,
    /// Fill opacity: the painted strength halved, or for unpainted hosts the
    /// average neighbor presence halved.
    pub opacity: f32,
    /// Corner fills, in order top-left, top-right, bottom-left, bottom-right.
    /// A corner is filled iff the two flanking orthogonal neighbors and the
    /// diagonal between them all share one nonzero paint sign.
    pub corners: [Option<Sign>; 4],
}

/// Everything needed to render one intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexNode {
    pub vertex: Vertex,
    /// Column/row index within the visible window.
    pub grid_index: (u16, u16),
    pub sign: Sign,
    /// Shift direction 0-8; forced to 0 when fuzzy placement is off.
    pub shift: u8,
    /// Stone texture variant selector.
    pub random: u8,
    pub dimmed: bool,
    /// In the shifting set: the stone visibly re-settles.
    pub animate: bool,
    /// In the placed set: the stone plays its appear animation.
    pub changed: bool,
    pub marker: Option<Marker>,
    /// Label needs the reduced type size.
    pub small_label: bool,
    /// Ghost stone; cleared on occupied intersections.
    pub ghost: Option<GhostStone>,
    pub heat: Option<HeatVertex>,
    pub paint: Option<PaintLayer>,
    pub selected: bool,
    /// Edges merged with adjacent also-selected intersections.
    pub selection_joins: EdgeJoins,
}

impl VertexNode {
    /// Build the node for one intersection, or `None` if it is outside the
    /// visible window.
    #[must_use]
    pub fn build(view: &BoardView<'_>, sets: &VertexSets, vertex: Vertex) -> Option<Self> {
        let geometry = view.geometry();
        let xi = view.range_x.index_of(vertex.x, geometry.width)?;
        let yi = view.range_y.index_of(vertex.y, geometry.height)?;

        let sign = view.sign(vertex);
        let marker = view.marker(vertex).cloned();
        let small_label = marker.as_ref().is_some_and(Marker::is_small_label);
        let ghost = if sign.is_stone() {
            None
        } else {
            view.ghost(vertex).copied()
        };

        let selected = sets.selected.contains(&vertex);
        let neighbor_selected = |dx: i32, dy: i32| {
            let x = i32::from(vertex.x) + dx;
            let y = i32::from(vertex.y) + dy;
            match (u16::try_from(x), u16::try_from(y)) {
                (Ok(x), Ok(y)) => sets.selected.contains(&Vertex::new(x, y)),
                _ => false,
            }
        };
        let selection_joins = if selected {
            EdgeJoins {
                left: neighbor_selected(-1, 0),
                right: neighbor_selected(1, 0),
                top: neighbor_selected(0, -1),
                bottom: neighbor_selected(0, 1),
            }
        } else {
            EdgeJoins::default()
        };

        Some(Self {
            vertex,
            grid_index: (xi, yi),
            sign,
            shift: if view.fuzzy_stone_placement {
                view.shift_map.get(vertex).copied().unwrap_or(0)
            } else {
                0
            },
            random: view.random_map.get(vertex).copied().unwrap_or(0),
            dimmed: sets.dimmed.contains(&vertex),
            animate: sets.shifting.contains(&vertex),
            changed: sets.placed.contains(&vertex),
            marker,
            small_label,
            ghost,
            heat: view.heat(vertex).cloned(),
            paint: paint_layer(view, vertex),
            selected,
            selection_joins,
        })
    }
}

/// Numeric paint sign: 1, -1, or 0 for unpainted.
#[inline]
fn paint_sign(strength: f32) -> i8 {
    if strength > 0.0 {
        1
    } else if strength < 0.0 {
        -1
    } else {
        0
    }
}

fn paint_layer(view: &BoardView<'_>, vertex: Vertex) -> Option<PaintLayer> {
    view.paint_map?;

    let (x, y) = (i32::from(vertex.x), i32::from(vertex.y));
    let own = view.paint_at(x, y);
    let left = view.paint_at(x - 1, y);
    let right = view.paint_at(x + 1, y);
    let top = view.paint_at(x, y - 1);
    let bottom = view.paint_at(x, y + 1);

    if own == 0.0 && left == 0.0 && right == 0.0 && top == 0.0 && bottom == 0.0 {
        return None;
    }

    let top_left = view.paint_at(x - 1, y - 1);
    let top_right = view.paint_at(x + 1, y - 1);
    let bottom_left = view.paint_at(x - 1, y + 1);
    let bottom_right = view.paint_at(x + 1, y + 1);

    let joins = if own != 0.0 {
        EdgeJoins {
            left: paint_sign(left) == paint_sign(own),
            right: paint_sign(right) == paint_sign(own),
            top: paint_sign(top) == paint_sign(own),
            bottom: paint_sign(bottom) == paint_sign(own),
        }
    } else {
        EdgeJoins::default()
    };

    let opacity = if own != 0.0 {
        own.abs() * 0.5
    } else {
        // Host-only cell: opacity follows how many neighbors are painted.
        [left, right, top, bottom]
            .iter()
            .map(|&strength| if strength != 0.0 { 0.5 } else { 0.0 })
            .sum::<f32>()
            / 4.0
    };

    // A corner squares off when both flanking edges and the diagonal agree
    // on one nonzero sign; the fill takes the vertical neighbor's color.
    let corner = |a: f32, b: f32, diagonal: f32| -> Option<Sign> {
        let sign = paint_sign(b);
        (sign != 0 && paint_sign(a) == sign && paint_sign(diagonal) == sign)
            .then(|| Sign::from_value(sign))
    };
    let corners = [
        corner(left, top, top_left),
        corner(right, top, top_right),
        corner(left, bottom, bottom_left),
        corner(right, bottom, bottom_right),
    ];

    Some(PaintLayer {
        sign: (own != 0.0).then(|| Sign::from_value(paint_sign(own))),
        joins,
        opacity,
        corners,
    })
}
