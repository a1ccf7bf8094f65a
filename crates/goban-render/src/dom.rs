#![forbid(unsafe_code)]

//! Retained backend: a full node tree for DOM/SVG hosts.
//!
//! The scene holds one [`VertexNode`] per visible intersection, positioned on
//! the cell grid, plus the grid-layer geometry and the annotation layer. The
//! host maps nodes to elements and lets its style system drive stone images,
//! shift transforms, and animations from the node fields.

use goban_core::geometry::GridLine;
use goban_core::vertex::Vertex;

use crate::RenderBackend;
use crate::lines::{LineShape, line_shapes};
use crate::node::VertexNode;
use crate::view::{BoardView, HoshiPoint, VertexSets, hoshi_points};

/// Scene for the retained backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomScene {
    /// Content surface size in pixels (no fuzzy padding; the retained host
    /// lets shifted stones overflow their cells).
    pub surface_width: f32,
    pub surface_height: f32,
    pub vertex_size: u32,
    pub grid_lines: Vec<GridLine>,
    pub hoshi_points: Vec<HoshiPoint>,
    /// One node per visible intersection, row-major.
    pub vertices: Vec<VertexNode>,
    /// Annotation layer, already translated into visible-window space.
    pub lines: Vec<LineShape>,
}

/// The retained renderer. Stateless; all state arrives through the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomRenderer;

impl RenderBackend for DomRenderer {
    type Scene = DomScene;

    fn render(&self, view: &BoardView<'_>) -> DomScene {
        let geometry = view.geometry();
        if geometry.is_empty() {
            return DomScene::default();
        }

        let sets = VertexSets::from_view(view);
        let (surface_width, surface_height) = geometry.surface_size();

        let mut vertices =
            Vec::with_capacity(usize::from(geometry.cols()) * usize::from(geometry.rows()));
        for y in view.range_y.coords(geometry.height) {
            for x in view.range_x.coords(geometry.width) {
                if let Some(node) = VertexNode::build(view, &sets, Vertex::new(x, y)) {
                    vertices.push(node);
                }
            }
        }

        DomScene {
            surface_width,
            surface_height,
            vertex_size: view.vertex_size,
            grid_lines: geometry.grid_lines().into_vec(),
            hoshi_points: hoshi_points(&geometry, view.hoshis),
            vertices,
            lines: line_shapes(view.lines, view.vertex_size, view.range_x, view.range_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DomRenderer, DomScene};
    use crate::RenderBackend;
    use crate::view::BoardView;
    use goban_core::geometry;
    use goban_core::grid::SignMap;
    use goban_core::range::AxisRange;
    use goban_core::shift::{RandomMap, ShiftMap};
    use goban_core::sign::Sign;
    use goban_core::vertex::Vertex;

    struct Fixture {
        position: SignMap,
        shift: ShiftMap,
        random: RandomMap,
        hoshis: Vec<Vertex>,
    }

    impl Fixture {
        fn new(dim: u16) -> Self {
            Self {
                position: SignMap::new(dim, dim),
                shift: ShiftMap::new(dim, dim),
                random: RandomMap::new(dim, dim),
                hoshis: geometry::hoshi(dim, dim),
            }
        }

        fn view(&self) -> BoardView<'_> {
            BoardView {
                position: &self.position,
                marker_map: None,
                ghost_map: None,
                heat_map: None,
                paint_map: None,
                shift_map: &self.shift,
                random_map: &self.random,
                selected: &[],
                dimmed: &[],
                placed: &[],
                shifting: &[],
                lines: &[],
                hoshis: &self.hoshis,
                vertex_size: 24,
                range_x: AxisRange::full(),
                range_y: AxisRange::full(),
                fuzzy_stone_placement: false,
            }
        }
    }

    #[test]
    fn full_board_scene_shape() {
        let mut fx = Fixture::new(9);
        fx.position.set(Vertex::new(4, 4), Sign::Black);
        let scene = DomRenderer.render(&fx.view());

        assert_eq!(scene.surface_width, 9.0 * 24.0);
        assert_eq!(scene.vertices.len(), 81);
        assert_eq!(scene.grid_lines.len(), 18);
        assert_eq!(scene.hoshi_points.len(), 9);

        // Row-major layout: the stone sits at index y * cols + x.
        let node = &scene.vertices[4 * 9 + 4];
        assert_eq!(node.vertex, Vertex::new(4, 4));
        assert_eq!(node.sign, Sign::Black);
        assert_eq!(node.grid_index, (4, 4));
    }

    #[test]
    fn empty_range_yields_empty_scene() {
        let mut fx = Fixture::new(9);
        fx.position.set(Vertex::new(0, 0), Sign::White);
        let view = BoardView {
            range_x: AxisRange::new(6, 2),
            ..fx.view()
        };
        assert_eq!(DomRenderer.render(&view), DomScene::default());
    }

    #[test]
    fn sub_range_reindexes_nodes() {
        let mut fx = Fixture::new(19);
        fx.position.set(Vertex::new(10, 10), Sign::White);
        let view = BoardView {
            range_x: AxisRange::new(9, 12),
            range_y: AxisRange::new(8, 13),
            ..fx.view()
        };
        let scene = DomRenderer.render(&view);
        assert_eq!(scene.vertices.len(), 4 * 6);
        let node = scene
            .vertices
            .iter()
            .find(|node| node.vertex == Vertex::new(10, 10))
            .expect("stone node");
        assert_eq!(node.grid_index, (1, 2));
    }
}
