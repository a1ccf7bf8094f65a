#![forbid(unsafe_code)]

//! Pointer interaction state machine.
//!
//! Translates raw host pointer events, already resolved to board vertices by
//! the geometry layer, into semantic board events: clicks, drags, long
//! presses, hovers, right-clicks.
//!
//! # Rules
//! - Only the primary pointer with the main button starts a press. Secondary
//!   pointers and buttons are ignored on the press path.
//! - Long press arms for touch and pen only, never mouse, and is polled via
//!   [`check_long_press`](PointerMachine::check_long_press) with an injected
//!   `now` so hosts drive it from whatever clock they have.
//! - Moving across a vertex distinct from the press vertex emits one
//!   [`Drag`](BoardPointerEvent::Drag) per distinct vertex, cancels the
//!   pending long press, and suppresses the click on release, even if the
//!   pointer returns to the press vertex.
//! - Hover tracks only while no press is active: one event per vertex
//!   change, a single `Hover(None)` when the pointer leaves the board
//!   surface, and nothing at all while a press is down.
//! - Cancel is treated like release. A press that saw no drag and no long
//!   press still clicks, so flaky touch hardware does not eat taps. The
//!   click fires at the release vertex; a release that resolves to no
//!   intersection is dropped.
//! - Right-click arrives out of band via
//!   [`context_menu`](PointerMachine::context_menu) and requires a valid
//!   vertex.

use std::time::Duration;

use web_time::Instant;

use crate::vertex::Vertex;

/// Host pointer device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Long press is a touch/pen affordance; mouse users have right-click.
    #[inline]
    #[must_use]
    pub const fn supports_long_press(self) -> bool {
        !matches!(self, Self::Mouse)
    }
}

/// Raw pointer transition reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    /// Host aborted the pointer stream. Handled like `Up`.
    Cancel,
    /// Pointer left the board surface entirely.
    Leave,
}

/// One raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub action: PointerAction,
    pub kind: PointerKind,
    /// Primary pointer of its kind (first touch, the mouse).
    pub primary: bool,
    /// Device button index; 0 is the main button.
    pub button: i16,
}

impl PointerInput {
    /// A primary main-button event, the common case.
    #[must_use]
    pub const fn primary(action: PointerAction, kind: PointerKind) -> Self {
        Self {
            action,
            kind,
            primary: true,
            button: 0,
        }
    }
}

/// Semantic event produced by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPointerEvent {
    /// Press and release without drag or long press.
    Click(Vertex),
    /// Context-menu request on a vertex.
    RightClick(Vertex),
    /// Touch/pen press held in place past the threshold.
    LongPress(Vertex),
    /// Pressed pointer entered a new vertex.
    Drag(Vertex),
    /// Pointer now rests over this vertex, or left the board.
    Hover(Option<Vertex>),
}

/// Tunables for the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerConfig {
    /// Hold time before a touch/pen press becomes a long press.
    pub long_press_threshold: Duration,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            long_press_threshold: Duration::from_millis(500),
        }
    }
}

#[derive(Debug)]
struct Press {
    vertex: Vertex,
    kind: PointerKind,
    started: Instant,
    dragged: bool,
    long_press_fired: bool,
    last_drag_vertex: Option<Vertex>,
}

/// Per-board pointer state machine.
///
/// Feed it every raw event via [`process`](Self::process) along with the
/// vertex under the pointer (resolved by the caller), and poll
/// [`check_long_press`](Self::check_long_press) while
/// [`long_press_deadline`](Self::long_press_deadline) is set.
#[derive(Debug, Default)]
pub struct PointerMachine {
    config: PointerConfig,
    press: Option<Press>,
    hover: Option<Vertex>,
}

impl PointerMachine {
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            press: None,
            hover: None,
        }
    }

    /// Process one raw event. `vertex` is the intersection under the pointer,
    /// `None` when the pointer is over padding or outside the grid.
    pub fn process(
        &mut self,
        input: PointerInput,
        vertex: Option<Vertex>,
        now: Instant,
    ) -> Vec<BoardPointerEvent> {
        let mut events = Vec::new();

        match input.action {
            PointerAction::Down => {
                if !input.primary || input.button != 0 {
                    return events;
                }
                if let Some(vertex) = vertex {
                    self.press = Some(Press {
                        vertex,
                        kind: input.kind,
                        started: now,
                        dragged: false,
                        long_press_fired: false,
                        last_drag_vertex: None,
                    });
                }
            }
            PointerAction::Move => {
                if let Some(press) = &mut self.press {
                    if let Some(vertex) = vertex
                        && vertex != press.vertex
                        && press.last_drag_vertex != Some(vertex)
                    {
                        press.dragged = true;
                        press.last_drag_vertex = Some(vertex);
                        events.push(BoardPointerEvent::Drag(vertex));
                    }
                } else {
                    self.update_hover(vertex, &mut events);
                }
            }
            PointerAction::Up | PointerAction::Cancel => {
                if let Some(press) = self.press.take()
                    && !press.dragged
                    && !press.long_press_fired
                    && let Some(vertex) = vertex
                {
                    events.push(BoardPointerEvent::Click(vertex));
                }
            }
            PointerAction::Leave => {
                self.update_hover(None, &mut events);
            }
        }

        events
    }

    /// Deadline at which the pending press becomes a long press, if one is
    /// armed. Re-resolves after every [`process`](Self::process) call.
    #[must_use]
    pub fn long_press_deadline(&self) -> Option<Instant> {
        let press = self.press.as_ref()?;
        if press.kind.supports_long_press() && !press.dragged && !press.long_press_fired {
            Some(press.started + self.config.long_press_threshold)
        } else {
            None
        }
    }

    /// Fire the long press if it is due. Stale or early calls return `None`.
    pub fn check_long_press(&mut self, now: Instant) -> Option<BoardPointerEvent> {
        let deadline = self.long_press_deadline()?;
        if now < deadline {
            return None;
        }
        let press = self.press.as_mut()?;
        press.long_press_fired = true;
        Some(BoardPointerEvent::LongPress(press.vertex))
    }

    /// Context-menu request. Emits only over a valid vertex.
    #[must_use]
    pub fn context_menu(&self, vertex: Option<Vertex>) -> Option<BoardPointerEvent> {
        vertex.map(BoardPointerEvent::RightClick)
    }

    /// Vertex currently hovered, if any.
    #[inline]
    #[must_use]
    pub fn hovered(&self) -> Option<Vertex> {
        self.hover
    }

    fn update_hover(&mut self, vertex: Option<Vertex>, events: &mut Vec<BoardPointerEvent>) {
        if vertex != self.hover {
            self.hover = vertex;
            events.push(BoardPointerEvent::Hover(vertex));
        }
    }
}
