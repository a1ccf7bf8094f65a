#![forbid(unsafe_code)]

//! Change detection and the placement animation window.
//!
//! [`AnimationScheduler`] owns the shift/random maps and the transient
//! placed/shifting sets. [`observe`](AnimationScheduler::observe) must be
//! called synchronously with each new position snapshot, before any paint:
//! deferring it to a later tick produces a visible one-frame flash of the
//! stone in its final position before the animation starts.
//!
//! # State machine
//! - Dimension change ⇒ full reset: maps regenerated, sets cleared, timer
//!   cancelled. No animation plays across a resize.
//! - Same dimensions with new stones ⇒ placed/shifting sets grow by union
//!   and the single expiry deadline is re-armed (extended, not restarted
//!   from an empty set). A vertex already mid-animation is not replayed if
//!   changed again; this is an accepted imperfection, not a bug.
//! - Expiry ⇒ both sets clear, caller repaints so static paths pick the
//!   stones back up.
//!
//! Timers are polled deadlines: the host asks for [`deadline`]
//! (AnimationScheduler::deadline) and calls [`expire`]
//! (AnimationScheduler::expire) when it fires. A stale callback (deadline
//! re-armed or cleared in the meantime) is a no-op by construction.

use std::time::Duration;

use ahash::AHashSet;
use web_time::Instant;

use crate::diff::diff_sign_maps;
use crate::grid::SignMap;
use crate::shift::{RandomMap, ShiftEngine, ShiftMap};
use crate::vertex::Vertex;

/// Placement animation and fuzzy placement toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Animate newly placed stones through the overlay path.
    pub animate_stone_placement: bool,
    /// Apply cosmetic shift offsets to stones.
    pub fuzzy_stone_placement: bool,
    /// Length of the placement animation window.
    pub duration: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            animate_stone_placement: false,
            fuzzy_stone_placement: false,
            duration: Duration::from_millis(200),
        }
    }
}

/// What a position update did to the animation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// Dimensions changed: maps regenerated, sets cleared, timer cancelled.
    Reset,
    /// Same dimensions, these vertices gained stones.
    Changed(Vec<Vertex>),
    /// Nothing new on the board.
    Unchanged,
}

/// Per-board-instance scheduler driving placement animation state.
#[derive(Debug)]
pub struct AnimationScheduler {
    config: AnimationConfig,
    engine: ShiftEngine,
    shift_map: ShiftMap,
    random_map: RandomMap,
    prev: SignMap,
    placed: AHashSet<Vertex>,
    shifting: AHashSet<Vertex>,
    deadline: Option<Instant>,
}

impl AnimationScheduler {
    /// Scheduler with an OS-seeded RNG.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self::with_engine(config, ShiftEngine::new())
    }

    /// Scheduler with a deterministic RNG seed.
    #[must_use]
    pub fn with_seed(config: AnimationConfig, seed: u64) -> Self {
        Self::with_engine(config, ShiftEngine::with_seed(seed))
    }

    fn with_engine(config: AnimationConfig, engine: ShiftEngine) -> Self {
        Self {
            config,
            engine,
            shift_map: ShiftMap::new(0, 0),
            random_map: RandomMap::new(0, 0),
            prev: SignMap::new(0, 0),
            placed: AHashSet::new(),
            shifting: AHashSet::new(),
            deadline: None,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Feed a new position snapshot. Runs synchronously: diffing, shift-map
    /// patching, and set updates all happen before this returns.
    pub fn observe(&mut self, position: &SignMap, now: Instant) -> ObserveOutcome {
        if !self.prev.same_dimensions(position) {
            // New board: wipe everything out.
            self.shift_map = self
                .engine
                .regenerate_shift_map(position.width(), position.height());
            self.random_map = self
                .engine
                .regenerate_random_map(position.width(), position.height());
            self.placed.clear();
            self.shifting.clear();
            self.deadline = None;
            self.prev = position.clone();

            #[cfg(feature = "tracing")]
            tracing::debug!(
                width = position.width(),
                height = position.height(),
                "board dimensions changed, animation state reset"
            );
            return ObserveOutcome::Reset;
        }

        let changed = diff_sign_maps(&self.prev, position);
        self.prev = position.clone();

        if changed.is_empty() {
            return ObserveOutcome::Unchanged;
        }

        if self.config.fuzzy_stone_placement {
            self.engine.patch_shift_map(&mut self.shift_map, &changed);
        }

        if self.config.animate_stone_placement {
            self.placed.extend(changed.iter().copied());
            if self.config.fuzzy_stone_placement {
                for &vertex in &changed {
                    self.shifting
                        .extend(vertex.neighborhood(position.width(), position.height()));
                }
            }
            // Extend the window rather than restarting it: chained placements
            // animate together and clear at the re-armed expiry.
            self.deadline = Some(now + self.config.duration);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                placed = self.placed.len(),
                shifting = self.shifting.len(),
                "placement animation window armed"
            );
        }

        ObserveOutcome::Changed(changed)
    }

    /// The single outstanding expiry instant, if an animation is running.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether an animation window is open.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire the animation timer if it is due. Returns `true` when the sets
    /// were cleared and a repaint is needed. Stale or early calls are no-ops.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let had_overlay = !self.placed.is_empty() || !self.shifting.is_empty();
                self.placed.clear();
                self.shifting.clear();
                had_overlay
            }
            _ => false,
        }
    }

    /// Stones placed within the current animation window, row-major sorted.
    #[must_use]
    pub fn placed(&self) -> Vec<Vertex> {
        let mut out: Vec<_> = self.placed.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Vertices whose shift was invalidated and must visibly re-settle,
    /// row-major sorted.
    #[must_use]
    pub fn shifting(&self) -> Vec<Vertex> {
        let mut out: Vec<_> = self.shifting.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Current shift map (all zero offsets when fuzzy placement is off and
    /// no patch ever ran; renderers additionally gate on the fuzzy flag).
    #[inline]
    #[must_use]
    pub fn shift_map(&self) -> &ShiftMap {
        &self.shift_map
    }

    /// Current texture-variant map.
    #[inline]
    #[must_use]
    pub fn random_map(&self) -> &RandomMap {
        &self.random_map
    }
}
