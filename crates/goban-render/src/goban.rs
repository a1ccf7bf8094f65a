#![forbid(unsafe_code)]

//! The render entry point.
//!
//! [`Goban`] owns everything with a lifecycle: the position snapshot, the
//! animation scheduler (and through it the shift/random maps), the pointer
//! machine, the theme, and the caller-supplied overlay inputs. Hosts feed it
//! position updates, pointer events, and timer expirations, and pull scenes
//! from whichever backend they embed.
//!
//! All clocks are injected: `set_position`, `pointer_event`, and the expiry
//! polls take `now`, and [`next_deadline`](Goban::next_deadline) tells the
//! host when to call back. Dropping the board drops its deadlines with it.

use web_time::Instant;

use goban_core::animation::{AnimationConfig, AnimationScheduler, ObserveOutcome};
use goban_core::geometry::{self, BoardGeometry, PixelPoint};
use goban_core::grid::SignMap;
use goban_core::marks::LineMarker;
use goban_core::pointer::{
    BoardPointerEvent, PointerConfig, PointerInput, PointerMachine,
};
use goban_core::range::AxisRange;
use goban_core::theme::Theme;
use goban_core::vertex::Vertex;

use crate::RenderBackend;
use crate::canvas::{CanvasRenderer, CanvasScene};
use crate::dom::{DomRenderer, DomScene};
use crate::view::{BoardView, GhostMap, HeatMap, MarkerMap, PaintMap};

/// Display and interaction configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GobanConfig {
    pub vertex_size: u32,
    pub range_x: AxisRange,
    pub range_y: AxisRange,
    pub animation: AnimationConfig,
    pub pointer: PointerConfig,
}

impl Default for GobanConfig {
    fn default() -> Self {
        Self {
            vertex_size: 24,
            range_x: AxisRange::full(),
            range_y: AxisRange::full(),
            animation: AnimationConfig::default(),
            pointer: PointerConfig::default(),
        }
    }
}

/// One interactive board instance.
#[derive(Debug)]
pub struct Goban {
    config: GobanConfig,
    position: SignMap,
    scheduler: AnimationScheduler,
    pointer: PointerMachine,
    theme: Theme,

    marker_map: Option<MarkerMap>,
    ghost_map: Option<GhostMap>,
    heat_map: Option<HeatMap>,
    paint_map: Option<PaintMap>,
    selected: Vec<Vertex>,
    dimmed: Vec<Vertex>,
    lines: Vec<LineMarker>,

    // Derived per position; refreshed on observe/expire.
    hoshis: Vec<Vertex>,
    placed: Vec<Vertex>,
    shifting: Vec<Vertex>,
}

impl Goban {
    #[must_use]
    pub fn new(config: GobanConfig) -> Self {
        Self::with_scheduler(config, AnimationScheduler::new(config.animation))
    }

    /// Deterministic shift/texture randomness, for tests and replays.
    #[must_use]
    pub fn with_seed(config: GobanConfig, seed: u64) -> Self {
        Self::with_scheduler(config, AnimationScheduler::with_seed(config.animation, seed))
    }

    fn with_scheduler(config: GobanConfig, scheduler: AnimationScheduler) -> Self {
        Self {
            config,
            position: SignMap::new(0, 0),
            scheduler,
            pointer: PointerMachine::new(config.pointer),
            theme: Theme::default(),
            marker_map: None,
            ghost_map: None,
            heat_map: None,
            paint_map: None,
            selected: Vec::new(),
            dimmed: Vec::new(),
            lines: Vec::new(),
            hoshis: Vec::new(),
            placed: Vec::new(),
            shifting: Vec::new(),
        }
    }

    /// Replace the position snapshot. Diffing, shift patching, and animation
    /// set updates run before this returns, so the next scene already
    /// reflects them.
    pub fn set_position(&mut self, position: SignMap, now: Instant) -> ObserveOutcome {
        let outcome = self.scheduler.observe(&position, now);
        if matches!(outcome, ObserveOutcome::Reset) {
            self.hoshis = geometry::hoshi(position.width(), position.height());
        }
        self.position = position;
        self.sync_animation_sets();
        outcome
    }

    fn sync_animation_sets(&mut self) {
        self.placed = self.scheduler.placed();
        self.shifting = self.scheduler.shifting();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_markers(&mut self, markers: Option<MarkerMap>) {
        self.marker_map = markers;
    }

    pub fn set_ghosts(&mut self, ghosts: Option<GhostMap>) {
        self.ghost_map = ghosts;
    }

    pub fn set_heat(&mut self, heat: Option<HeatMap>) {
        self.heat_map = heat;
    }

    pub fn set_paint(&mut self, paint: Option<PaintMap>) {
        self.paint_map = paint;
    }

    pub fn set_selected(&mut self, selected: Vec<Vertex>) {
        self.selected = selected;
    }

    pub fn set_dimmed(&mut self, dimmed: Vec<Vertex>) {
        self.dimmed = dimmed;
    }

    pub fn set_lines(&mut self, lines: Vec<LineMarker>) {
        self.lines = lines;
    }

    pub fn set_vertex_size(&mut self, vertex_size: u32) {
        self.config.vertex_size = vertex_size;
    }

    pub fn set_ranges(&mut self, range_x: AxisRange, range_y: AxisRange) {
        self.config.range_x = range_x;
        self.config.range_y = range_y;
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GobanConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> &SignMap {
        &self.position
    }

    #[must_use]
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry {
            vertex_size: self.config.vertex_size,
            width: self.position.width(),
            height: self.position.height(),
            range_x: self.config.range_x,
            range_y: self.config.range_y,
        }
    }

    /// The complete renderer input for the current state.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            position: &self.position,
            marker_map: self.marker_map.as_ref(),
            ghost_map: self.ghost_map.as_ref(),
            heat_map: self.heat_map.as_ref(),
            paint_map: self.paint_map.as_ref(),
            shift_map: self.scheduler.shift_map(),
            random_map: self.scheduler.random_map(),
            selected: &self.selected,
            dimmed: &self.dimmed,
            placed: &self.placed,
            shifting: &self.shifting,
            lines: &self.lines,
            hoshis: &self.hoshis,
            vertex_size: self.config.vertex_size,
            range_x: self.config.range_x,
            range_y: self.config.range_y,
            fuzzy_stone_placement: self.config.animation.fuzzy_stone_placement,
        }
    }

    /// Render through the retained backend.
    #[must_use]
    pub fn render_dom(&self) -> DomScene {
        DomRenderer.render(&self.view())
    }

    /// Render through the immediate backend at a device pixel ratio.
    #[must_use]
    pub fn render_canvas(&self, pixel_ratio: f32) -> CanvasScene {
        CanvasRenderer::new(self.theme.clone(), pixel_ratio).render(&self.view())
    }

    /// Vertex under a surface point, in content coordinates (the host
    /// subtracts any fuzzy-padding offset before calling, mirroring how the
    /// padded bitmap is positioned at a negative offset).
    #[must_use]
    pub fn vertex_at(&self, point: PixelPoint) -> Option<Vertex> {
        self.geometry()
            .vertex_from_point(point, PixelPoint::new(0.0, 0.0))
    }

    /// Feed a raw pointer event at a surface point.
    pub fn pointer_event(
        &mut self,
        input: PointerInput,
        point: PixelPoint,
        now: Instant,
    ) -> Vec<BoardPointerEvent> {
        let vertex = self.vertex_at(point);
        self.pointer.process(input, vertex, now)
    }

    /// Context-menu request at a surface point. `Some` means the host should
    /// suppress its native menu and deliver the event.
    #[must_use]
    pub fn context_menu(&self, point: PixelPoint) -> Option<BoardPointerEvent> {
        self.pointer.context_menu(self.vertex_at(point))
    }

    /// Poll the long-press timer.
    pub fn check_long_press(&mut self, now: Instant) -> Option<BoardPointerEvent> {
        self.pointer.check_long_press(now)
    }

    /// Poll the animation timer. Returns `true` when the host should repaint.
    pub fn expire_animation(&mut self, now: Instant) -> bool {
        let repaint = self.scheduler.expire(now);
        if repaint {
            self.sync_animation_sets();
        }
        repaint
    }

    /// Earliest instant at which a timer wants a callback, across the
    /// animation window and any pending long press.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.scheduler.deadline(), self.pointer.long_press_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Goban, GobanConfig};
    use goban_core::animation::{AnimationConfig, ObserveOutcome};
    use goban_core::geometry::PixelPoint;
    use goban_core::grid::SignMap;
    use goban_core::pointer::{BoardPointerEvent, PointerAction, PointerInput, PointerKind};
    use goban_core::sign::Sign;
    use goban_core::vertex::Vertex;
    use web_time::Instant;

    fn animated_config() -> GobanConfig {
        GobanConfig {
            animation: AnimationConfig {
                animate_stone_placement: true,
                fuzzy_stone_placement: true,
                ..AnimationConfig::default()
            },
            ..GobanConfig::default()
        }
    }

    #[test]
    fn first_position_resets_and_computes_hoshis() {
        let mut goban = Goban::with_seed(animated_config(), 1);
        let outcome = goban.set_position(SignMap::new(19, 19), Instant::now());
        assert_eq!(outcome, ObserveOutcome::Reset);
        assert_eq!(goban.view().hoshis.len(), 9);
        assert_eq!(goban.view().shift_map.width(), 19);
    }

    #[test]
    fn placement_reaches_the_scene_synchronously() {
        let mut goban = Goban::with_seed(animated_config(), 2);
        let now = Instant::now();
        goban.set_position(SignMap::new(9, 9), now);

        let mut position = SignMap::new(9, 9);
        position.set(Vertex::new(3, 3), Sign::Black);
        goban.set_position(position, now);

        // The very first scene after the update already suppresses the stone
        // from the bitmap and carries it as overlay.
        let scene = goban.render_canvas(1.0);
        assert!(
            scene
                .overlay
                .iter()
                .any(|node| node.vertex == Vertex::new(3, 3) && node.changed)
        );

        // After expiry the stone returns to the static layer.
        let deadline = goban.next_deadline().unwrap();
        assert!(goban.expire_animation(deadline));
        let scene = goban.render_canvas(1.0);
        assert!(scene.overlay.is_empty());
    }

    #[test]
    fn click_resolves_through_geometry() {
        let mut goban = Goban::with_seed(GobanConfig::default(), 3);
        let now = Instant::now();
        goban.set_position(SignMap::new(9, 9), now);

        // Vertex size 24: the center of cell (3,3) is at (84, 84).
        let point = PixelPoint::new(84.0, 84.0);
        goban.pointer_event(
            PointerInput::primary(PointerAction::Down, PointerKind::Mouse),
            point,
            now,
        );
        let events = goban.pointer_event(
            PointerInput::primary(PointerAction::Up, PointerKind::Mouse),
            point,
            now,
        );
        assert!(events.contains(&BoardPointerEvent::Click(Vertex::new(3, 3))));
    }

    #[test]
    fn pointer_outside_board_is_dropped() {
        let mut goban = Goban::with_seed(GobanConfig::default(), 4);
        let now = Instant::now();
        goban.set_position(SignMap::new(9, 9), now);
        assert_eq!(goban.vertex_at(PixelPoint::new(500.0, 10.0)), None);
        assert_eq!(goban.context_menu(PixelPoint::new(500.0, 10.0)), None);
    }

    #[test]
    fn next_deadline_merges_timers() {
        let mut goban = Goban::with_seed(animated_config(), 5);
        let now = Instant::now();
        goban.set_position(SignMap::new(9, 9), now);
        assert_eq!(goban.next_deadline(), None);

        let mut position = SignMap::new(9, 9);
        position.set(Vertex::new(0, 0), Sign::Black);
        goban.set_position(position, now);
        let animation_deadline = goban.next_deadline().unwrap();

        // A touch press arms the long-press timer; the animation window
        // (200 ms) expires before the long press (500 ms).
        goban.pointer_event(
            PointerInput::primary(PointerAction::Down, PointerKind::Touch),
            PixelPoint::new(12.0, 12.0),
            now,
        );
        assert_eq!(goban.next_deadline(), Some(animation_deadline));
    }
}
