#![forbid(unsafe_code)]

//! Canvas overlay partitioning.
//!
//! The canvas backend bakes grid lines, star points, and baseline stones
//! into its bitmap and emits a lightweight overlay node for every
//! intersection whose appearance depends on anything else. The partition
//! invariant: every intersection with a non-baked feature appears in the
//! overlay set, and no baked stone is duplicated there unless it is
//! currently placed, shifting, or dimmed.

use ahash::AHashMap;
use bitflags::bitflags;

use goban_core::vertex::Vertex;

use crate::view::BoardView;

bitflags! {
    /// Why an intersection needs an overlay node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OverlayReasons: u8 {
        const MARKER = 1 << 0;
        /// Ghost stone on an empty intersection. Ghosts under stones are
        /// ignored entirely.
        const GHOST = 1 << 1;
        /// Heat with strength in the renderable 1-9 band.
        const HEAT = 1 << 2;
        /// Painted itself or orthogonally adjacent to paint (neighbors host
        /// the join corners).
        const PAINT = 1 << 3;
        const SELECTED = 1 << 4;
        const PLACED = 1 << 5;
        const SHIFTING = 1 << 6;
        const DIMMED = 1 << 7;
    }
}

/// Classify every visible intersection. The result holds exactly the
/// intersections needing an overlay node, with the reasons they need one.
#[must_use]
pub fn overlay_set(view: &BoardView<'_>) -> AHashMap<Vertex, OverlayReasons> {
    let geometry = view.geometry();
    let mut needed: AHashMap<Vertex, OverlayReasons> = AHashMap::new();
    let mut add = |vertex: Vertex, reason: OverlayReasons| {
        if geometry.pixel_origin(vertex).is_some() {
            *needed.entry(vertex).or_insert(OverlayReasons::empty()) |= reason;
        }
    };

    if let Some(markers) = view.marker_map {
        for (vertex, cell) in markers.iter() {
            if cell.is_some() {
                add(vertex, OverlayReasons::MARKER);
            }
        }
    }

    if let Some(ghosts) = view.ghost_map {
        for (vertex, cell) in ghosts.iter() {
            if cell.is_some() && !view.sign(vertex).is_stone() {
                add(vertex, OverlayReasons::GHOST);
            }
        }
    }

    if let Some(heat) = view.heat_map {
        for (vertex, cell) in heat.iter() {
            if cell.as_ref().is_some_and(|heat| heat.is_visible()) {
                add(vertex, OverlayReasons::HEAT);
            }
        }
    }

    if let Some(paint) = view.paint_map {
        for (vertex, &strength) in paint.iter() {
            if strength != 0.0 {
                add(vertex, OverlayReasons::PAINT);
                // The four neighbors render the join edges and corners even
                // when unpainted themselves.
                let (x, y) = (i32::from(vertex.x), i32::from(vertex.y));
                for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                    if let (Ok(nx), Ok(ny)) = (u16::try_from(nx), u16::try_from(ny)) {
                        add(Vertex::new(nx, ny), OverlayReasons::PAINT);
                    }
                }
            }
        }
    }

    for &vertex in view.selected {
        add(vertex, OverlayReasons::SELECTED);
    }
    for &vertex in view.dimmed {
        add(vertex, OverlayReasons::DIMMED);
    }
    for &vertex in view.placed {
        add(vertex, OverlayReasons::PLACED);
    }
    for &vertex in view.shifting {
        add(vertex, OverlayReasons::SHIFTING);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(overlay = needed.len(), "canvas overlay partition computed");

    needed
}

#[cfg(test)]
mod tests {
    use super::{OverlayReasons, overlay_set};
    use crate::view::{BoardView, GhostMap, HeatMap, MarkerMap, PaintMap};
    use goban_core::grid::SignMap;
    use goban_core::marks::{GhostStone, HeatVertex, Marker, MarkerKind};
    use goban_core::range::AxisRange;
    use goban_core::shift::{RandomMap, ShiftMap};
    use goban_core::sign::Sign;
    use goban_core::vertex::Vertex;

    struct Fixture {
        position: SignMap,
        shift: ShiftMap,
        random: RandomMap,
        markers: Option<MarkerMap>,
        ghosts: Option<GhostMap>,
        heat: Option<HeatMap>,
        paint: Option<PaintMap>,
        selected: Vec<Vertex>,
        dimmed: Vec<Vertex>,
        placed: Vec<Vertex>,
        shifting: Vec<Vertex>,
    }

    impl Fixture {
        fn new(dim: u16) -> Self {
            Self {
                position: SignMap::new(dim, dim),
                shift: ShiftMap::new(dim, dim),
                random: RandomMap::new(dim, dim),
                markers: None,
                ghosts: None,
                heat: None,
                paint: None,
                selected: Vec::new(),
                dimmed: Vec::new(),
                placed: Vec::new(),
                shifting: Vec::new(),
            }
        }

        fn view(&self) -> BoardView<'_> {
            BoardView {
                position: &self.position,
                marker_map: self.markers.as_ref(),
                ghost_map: self.ghosts.as_ref(),
                heat_map: self.heat.as_ref(),
                paint_map: self.paint.as_ref(),
                shift_map: &self.shift,
                random_map: &self.random,
                selected: &self.selected,
                dimmed: &self.dimmed,
                placed: &self.placed,
                shifting: &self.shifting,
                lines: &[],
                hoshis: &[],
                vertex_size: 24,
                range_x: AxisRange::full(),
                range_y: AxisRange::full(),
                fuzzy_stone_placement: false,
            }
        }
    }

    #[test]
    fn one_feature_per_vertex_is_exact() {
        let mut fx = Fixture::new(19);

        let mut markers = MarkerMap::new(19, 19);
        markers.set(Vertex::new(0, 0), Some(Marker::of(MarkerKind::Circle)));
        fx.markers = Some(markers);

        let mut ghosts = GhostMap::new(19, 19);
        ghosts.set(Vertex::new(2, 0), Some(GhostStone::of(Sign::Black)));
        fx.ghosts = Some(ghosts);

        let mut heat = HeatMap::new(19, 19);
        heat.set(
            Vertex::new(4, 0),
            Some(HeatVertex {
                strength: 5,
                text: None,
            }),
        );
        fx.heat = Some(heat);

        fx.selected = vec![Vertex::new(6, 0)];
        fx.dimmed = vec![Vertex::new(8, 0)];
        fx.placed = vec![Vertex::new(10, 0)];
        fx.shifting = vec![Vertex::new(12, 0)];

        let view = fx.view();
        let overlay = overlay_set(&view);

        let expected = [
            (Vertex::new(0, 0), OverlayReasons::MARKER),
            (Vertex::new(2, 0), OverlayReasons::GHOST),
            (Vertex::new(4, 0), OverlayReasons::HEAT),
            (Vertex::new(6, 0), OverlayReasons::SELECTED),
            (Vertex::new(8, 0), OverlayReasons::DIMMED),
            (Vertex::new(10, 0), OverlayReasons::PLACED),
            (Vertex::new(12, 0), OverlayReasons::SHIFTING),
        ];
        assert_eq!(overlay.len(), expected.len());
        for (vertex, reasons) in expected {
            assert_eq!(overlay.get(&vertex), Some(&reasons), "{vertex:?}");
        }
    }

    #[test]
    fn paint_marks_self_and_orthogonal_neighbors() {
        let mut fx = Fixture::new(9);
        let mut paint = PaintMap::new(9, 9);
        paint.set(Vertex::new(4, 4), 1.0);
        fx.paint = Some(paint);

        let view = fx.view();
        let overlay = overlay_set(&view);
        assert_eq!(overlay.len(), 5);
        for vertex in [
            Vertex::new(4, 4),
            Vertex::new(3, 4),
            Vertex::new(5, 4),
            Vertex::new(4, 3),
            Vertex::new(4, 5),
        ] {
            assert_eq!(overlay.get(&vertex), Some(&OverlayReasons::PAINT));
        }
    }

    #[test]
    fn ghost_under_stone_ignored() {
        let mut fx = Fixture::new(9);
        fx.position.set(Vertex::new(3, 3), Sign::White);
        let mut ghosts = GhostMap::new(9, 9);
        ghosts.set(Vertex::new(3, 3), Some(GhostStone::of(Sign::Black)));
        fx.ghosts = Some(ghosts);

        let view = fx.view();
        assert!(overlay_set(&view).is_empty());
    }

    #[test]
    fn heat_out_of_band_ignored() {
        let mut fx = Fixture::new(9);
        let mut heat = HeatMap::new(9, 9);
        heat.set(
            Vertex::new(0, 0),
            Some(HeatVertex {
                strength: 0,
                text: None,
            }),
        );
        heat.set(
            Vertex::new(1, 0),
            Some(HeatVertex {
                strength: 10,
                text: None,
            }),
        );
        fx.heat = Some(heat);

        let view = fx.view();
        assert!(overlay_set(&view).is_empty());
    }

    #[test]
    fn off_range_features_excluded() {
        let mut fx = Fixture::new(19);
        let mut markers = MarkerMap::new(19, 19);
        markers.set(Vertex::new(15, 15), Some(Marker::of(MarkerKind::Cross)));
        markers.set(Vertex::new(2, 2), Some(Marker::of(MarkerKind::Cross)));
        fx.markers = Some(markers);

        let mut view = fx.view();
        view.range_x = AxisRange::new(0, 8);
        view.range_y = AxisRange::new(0, 8);
        let overlay = overlay_set(&view);
        assert_eq!(overlay.len(), 1);
        assert!(overlay.contains_key(&Vertex::new(2, 2)));
    }

    #[test]
    fn reasons_accumulate() {
        let mut fx = Fixture::new(9);
        fx.position.set(Vertex::new(5, 5), Sign::Black);
        fx.selected = vec![Vertex::new(5, 5)];
        fx.dimmed = vec![Vertex::new(5, 5)];

        let view = fx.view();
        let overlay = overlay_set(&view);
        assert_eq!(
            overlay.get(&Vertex::new(5, 5)),
            Some(&(OverlayReasons::SELECTED | OverlayReasons::DIMMED))
        );
    }
}
