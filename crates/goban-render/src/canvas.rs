#![forbid(unsafe_code)]

//! Immediate backend: a flat draw-command list for 2D-canvas hosts.
//!
//! The bitmap bakes grid lines, star points, and baseline stones; everything
//! interactive or animated goes out as overlay [`VertexNode`]s chosen by the
//! partitioner. The command list is ordered back-to-front and replayable as-is
//! against a 2D context.
//!
//! Stone pass: each stone first draws an opaque disc that only exists to cast
//! the drop shadow (shadow alpha multiplies source alpha, so the caster must
//! be opaque for the shadow color to come out exact), then the texture image
//! or the flat-color fallback on top with the shadow cleared. White fallback
//! stones get a thin outline so they read against the board.

use goban_core::geometry::fuzzy_padding;
use goban_core::shift::shift_offset;
use goban_core::sign::Sign;
use goban_core::theme::{TextureId, Theme, cached_stone_textures};
use goban_core::vertex::Vertex;

use crate::RenderBackend;
use crate::lines::{LineShape, line_shapes};
use crate::node::VertexNode;
use crate::partition::overlay_set;
use crate::view::{BoardView, VertexSets, hoshi_points};

/// Stone inset from the cell edge as a fraction of the vertex size.
const STONE_MARGIN_FACTOR: f32 = 0.04;

const SHADOW_COLOR: &str = "rgba(23, 10, 2, 0.4)";
const WHITE_STONE_OUTLINE: &str = "#c3c3c3";

/// One replayable 2D drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    /// Shift the coordinate system; emitted once for the fuzzy padding.
    Translate {
        dx: f32,
        dy: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: String,
    },
    StrokeCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: String,
        line_width: f32,
    },
    DrawImage {
        texture: TextureId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    SetShadow {
        color: String,
        blur: f32,
        offset_y: f32,
    },
    ClearShadow,
}

/// Scene for the immediate backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasScene {
    /// Bitmap size in CSS pixels, fuzzy padding included on all sides. Hosts
    /// scale the backing store by `pixel_ratio` and offset the element by
    /// `-fuzzy_padding` so content coordinates line up with the cell grid.
    pub bitmap_width: f32,
    pub bitmap_height: f32,
    pub pixel_ratio: f32,
    pub fuzzy_padding: u32,
    pub vertex_size: u32,
    pub commands: Vec<DrawCmd>,
    /// Overlay nodes for intersections the bitmap cannot serve, unordered.
    pub overlay: Vec<VertexNode>,
    /// Annotation layer, in content (unpadded) coordinates.
    pub lines: Vec<LineShape>,
}

/// The immediate renderer. Carries the resolved theme and the device pixel
/// ratio of the target surface.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    pub theme: Theme,
    pub pixel_ratio: f32,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            pixel_ratio: 1.0,
        }
    }
}

impl CanvasRenderer {
    #[must_use]
    pub fn new(theme: Theme, pixel_ratio: f32) -> Self {
        Self { theme, pixel_ratio }
    }

    /// Texture for a stone color: the theme's own handle, or the process-wide
    /// bake for this scale, or `None` for the flat-color fallback.
    fn stone_texture(&self, sign: Sign, vertex_size: u32) -> Option<TextureId> {
        let themed = match sign {
            Sign::Black => self.theme.black_stone_texture,
            Sign::White => self.theme.white_stone_texture,
            Sign::Empty => None,
        };
        themed.or_else(|| {
            cached_stone_textures(vertex_size, self.pixel_ratio).map(|baked| match sign {
                Sign::White => baked.white,
                _ => baked.black,
            })
        })
    }

    fn push_stone(&self, commands: &mut Vec<DrawCmd>, view: &BoardView<'_>, node: StoneAt) {
        let vs = view.vertex_size as f32;
        let half = vs / 2.0;
        let margin = STONE_MARGIN_FACTOR * vs;
        let size = vs - 2.0 * margin;

        let cx = f32::from(2 * node.xi + 1) * half;
        let cy = f32::from(2 * node.yi + 1) * half;
        let (offset_x, offset_y) = if view.fuzzy_stone_placement {
            let shift = view.shift_map.get(node.vertex).copied().unwrap_or(0);
            shift_offset(shift, view.vertex_size)
        } else {
            (0.0, 0.0)
        };

        let x = cx - half + margin + offset_x;
        let y = cy - half + margin + offset_y;
        let center_x = x + size / 2.0;
        let center_y = y + size / 2.0;
        let radius = size / 2.0;

        // Opaque shadow caster under the stone.
        commands.push(DrawCmd::SetShadow {
            color: SHADOW_COLOR.into(),
            blur: 0.4 * vs,
            offset_y: 0.1 * vs,
        });
        commands.push(DrawCmd::FillCircle {
            cx: center_x,
            cy: center_y,
            radius,
            color: "#000".into(),
        });
        commands.push(DrawCmd::ClearShadow);

        if let Some(texture) = self.stone_texture(node.sign, view.vertex_size) {
            commands.push(DrawCmd::DrawImage {
                texture,
                x,
                y,
                width: size,
                height: size,
            });
        } else {
            commands.push(DrawCmd::FillCircle {
                cx: center_x,
                cy: center_y,
                radius,
                color: self.theme.stone_color(node.sign).into(),
            });
            if node.sign == Sign::White {
                commands.push(DrawCmd::StrokeCircle {
                    cx: center_x,
                    cy: center_y,
                    radius,
                    color: WHITE_STONE_OUTLINE.into(),
                    line_width: 1.0,
                });
            }
        }
    }
}

struct StoneAt {
    vertex: Vertex,
    xi: u16,
    yi: u16,
    sign: Sign,
}

impl RenderBackend for CanvasRenderer {
    type Scene = CanvasScene;

    fn render(&self, view: &BoardView<'_>) -> CanvasScene {
        let geometry = view.geometry();
        if geometry.is_empty() {
            return CanvasScene {
                pixel_ratio: self.pixel_ratio,
                ..CanvasScene::default()
            };
        }

        let sets = VertexSets::from_view(view);
        let padding = fuzzy_padding(view.vertex_size, view.fuzzy_stone_placement);
        let (content_width, content_height) = geometry.surface_size();
        let bitmap_width = content_width + 2.0 * padding as f32;
        let bitmap_height = content_height + 2.0 * padding as f32;

        let mut commands = vec![
            DrawCmd::Clear {
                width: bitmap_width,
                height: bitmap_height,
            },
            DrawCmd::Translate {
                dx: padding as f32,
                dy: padding as f32,
            },
        ];

        for line in geometry.grid_lines() {
            commands.push(DrawCmd::FillRect {
                x: line.x,
                y: line.y,
                width: line.width,
                height: line.height,
                color: self.theme.foreground_color.clone(),
            });
        }

        for point in hoshi_points(&geometry, view.hoshis) {
            commands.push(DrawCmd::FillCircle {
                cx: point.center.x,
                cy: point.center.y,
                radius: point.radius,
                color: self.theme.foreground_color.clone(),
            });
        }

        for (yi, y) in view.range_y.coords(geometry.height).enumerate() {
            for (xi, x) in view.range_x.coords(geometry.width).enumerate() {
                let vertex = Vertex::new(x, y);
                let sign = view.sign(vertex);
                if !sign.is_stone() || !sets.stone_is_static(vertex) {
                    continue;
                }
                self.push_stone(
                    &mut commands,
                    view,
                    StoneAt {
                        vertex,
                        xi: xi as u16,
                        yi: yi as u16,
                        sign,
                    },
                );
            }
        }

        let mut overlay: Vec<VertexNode> = overlay_set(view)
            .keys()
            .filter_map(|&vertex| VertexNode::build(view, &sets, vertex))
            .collect();
        // Deterministic scene output regardless of hash order.
        overlay.sort_by_key(|node| node.vertex);

        CanvasScene {
            bitmap_width,
            bitmap_height,
            pixel_ratio: self.pixel_ratio,
            fuzzy_padding: padding,
            vertex_size: view.vertex_size,
            commands,
            overlay,
            lines: line_shapes(view.lines, view.vertex_size, view.range_x, view.range_y),
        }
    }
}
