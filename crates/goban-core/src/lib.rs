#![forbid(unsafe_code)]

//! Core: board-state model, geometry, fuzzy placement, and interaction.
//!
//! # Role in goban
//! `goban-core` is the model layer. It owns the board data types (signs,
//! grids, visible ranges), the pure geometry that maps intersections to
//! pixels and back, the fuzzy-shift engine, synchronous change detection
//! with animation scheduling, and the pointer interaction state machine.
//!
//! # Primary responsibilities
//! - **Grid/Sign/Vertex**: rectangular board snapshots with tolerant reads.
//! - **Geometry**: pixel mapping, point inversion, grid lines, star points.
//! - **ShiftEngine**: cosmetic stone jitter with the no-mutual-approach
//!   invariant.
//! - **AnimationScheduler**: diff-driven placement animation windows.
//! - **PointerMachine**: raw pointer events to board-semantic events.
//!
//! # How it fits in the system
//! `goban-render` consumes these types to build backend scenes. Everything
//! here is synchronous and deterministic: callers inject `now`, timers are
//! polled deadlines, and randomness flows through a seedable RNG.

pub mod animation;
pub mod diff;
pub mod geometry;
pub mod grid;
pub mod marks;
pub mod pointer;
pub mod range;
pub mod shift;
pub mod sign;
pub mod theme;
pub mod vertex;

pub use grid::Grid;
pub use range::AxisRange;
pub use sign::Sign;
pub use vertex::Vertex;
