#![forbid(unsafe_code)]

//! Render backends: retained node scenes and canvas draw-command scenes.
//!
//! # Role in goban
//! `goban-render` turns the model types from `goban-core` into paintable
//! scenes. Two interchangeable backends consume the same [`view::BoardView`]:
//! the retained backend emits one positioned node per visible intersection
//! (for a DOM/SVG host), the canvas backend emits a flat draw-command list
//! plus a minimal overlay node list (for a 2D-context host). Both produce
//! pixel-identical stone centers, grid lines, and star points.
//!
//! # Primary responsibilities
//! - **Partitioner**: decide per intersection whether the canvas backend
//!   needs an overlay node or can bake everything into the bitmap.
//! - **VertexNode**: the shared retained description of one intersection,
//!   including paint/selection neighbor joins.
//! - **DomRenderer / CanvasRenderer**: the two backend implementations.
//! - **Size calculator**: bounded-fit integer vertex sizing.
//! - **Goban**: the orchestrator owning scheduler, pointer machine, and
//!   overlay inputs, exposing the render entry point.
//!
//! # How it fits in the system
//! An embedding host owns the real surface (DOM tree or canvas context),
//! feeds pointer events and timer expirations into [`goban::Goban`], and
//! maps the produced scenes onto its surface. Nothing here touches a
//! platform API.

pub mod canvas;
pub mod dom;
pub mod goban;
pub mod lines;
pub mod node;
pub mod partition;
pub mod size;
pub mod view;

pub use goban::{Goban, GobanConfig};
pub use view::BoardView;

/// A render backend: one strategy for turning a board view into a scene the
/// host can paint.
///
/// Implementations must depend only on the shared [`BoardView`] contract,
/// never on each other.
pub trait RenderBackend {
    /// Host-consumable scene description.
    type Scene;

    /// Build a scene for the current view. An empty visible range yields an
    /// empty scene, never an error.
    fn render(&self, view: &BoardView<'_>) -> Self::Scene;
}
