#![forbid(unsafe_code)]

//! Fuzzy stone placement: per-stone shift directions and the adjacency
//! invariant.
//!
//! Each intersection carries a shift direction 0–8 (0 centered, 1–8 one of
//! the eight compass offsets). Shifts are cosmetic: they nudge the rendered
//! stone by a fraction of the vertex size but never affect hit-testing.
//!
//! # Invariants
//! 1. After [`readjust_all`] (or a local [`readjust`] around a patched
//!    vertex), no two orthogonally adjacent intersections lean toward each
//!    other: when a vertex leans at a cardinal neighbor and that neighbor
//!    leans back, the neighbor is reset to centered.
//! 2. A freshly placed stone always gets a non-zero direction, so placement
//!    visibly settles.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::grid::Grid;
use crate::vertex::Vertex;

/// Per-intersection shift directions.
pub type ShiftMap = Grid<u8>;

/// Per-intersection stone texture variant selector, 0–4.
pub type RandomMap = Grid<u8>;

/// Number of stone texture variants.
pub const RANDOM_VARIANTS: u8 = 5;

/// Pixel offset fractions per direction, in units of the vertex size.
/// Index 0 is centered; 1–4 cardinal (left, up, right, down); 5–8 diagonal
/// (up-left, up-right, down-right, down-left).
pub const SHIFT_OFFSETS: [(f32, f32); 9] = [
    (0.0, 0.0),
    (-0.07, 0.0),
    (0.0, -0.07),
    (0.07, 0.0),
    (0.0, 0.07),
    (-0.04, -0.04),
    (0.04, -0.04),
    (0.04, 0.04),
    (-0.04, 0.04),
];

/// Direction triples leaning toward each cardinal neighbor, paired with the
/// neighbor offset and the neighbor's conflicting (leaning-back) triple.
const LEAN_TABLE: [([u8; 3], (i32, i32), [u8; 3]); 4] = [
    // Left
    ([1, 5, 8], (-1, 0), [3, 7, 6]),
    // Top
    ([2, 5, 6], (0, -1), [4, 7, 8]),
    // Right
    ([3, 7, 6], (1, 0), [1, 5, 8]),
    // Bottom
    ([4, 7, 8], (0, 1), [2, 5, 6]),
];

/// Pixel offset of a shift direction for a given vertex size.
#[inline]
#[must_use]
pub fn shift_offset(direction: u8, vertex_size: u32) -> (f32, f32) {
    let (dx, dy) = SHIFT_OFFSETS
        .get(usize::from(direction))
        .copied()
        .unwrap_or((0.0, 0.0));
    (dx * vertex_size as f32, dy * vertex_size as f32)
}

/// Resolve shift conflicts around one vertex: any cardinal neighbor leaning
/// back toward it is reset to centered.
pub fn readjust(map: &mut ShiftMap, vertex: Vertex) {
    let Some(&direction) = map.get(vertex) else {
        return;
    };

    for (leaning, (dx, dy), conflicting) in LEAN_TABLE {
        if !leaning.contains(&direction) {
            continue;
        }
        let qx = i32::from(vertex.x) + dx;
        let qy = i32::from(vertex.y) + dy;
        if let Some(&neighbor) = map.get_signed(qx, qy)
            && conflicting.contains(&neighbor)
        {
            map.set(Vertex::new(qx as u16, qy as u16), 0);
        }
    }
}

/// Apply the pairwise correction across every intersection in raster order.
pub fn readjust_all(map: &mut ShiftMap) {
    for y in 0..map.height() {
        for x in 0..map.width() {
            readjust(map, Vertex::new(x, y));
        }
    }
}

/// Owns the RNG behind shift and texture maps.
///
/// Whole maps are regenerated on dimension changes; individual vertices are
/// patched when stones appear. Seedable for deterministic tests.
#[derive(Debug)]
pub struct ShiftEngine {
    rng: SmallRng,
}

impl ShiftEngine {
    /// Engine seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministically seeded engine.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fresh shift map: uniform random directions, then a global readjust.
    #[must_use]
    pub fn regenerate_shift_map(&mut self, width: u16, height: u16) -> ShiftMap {
        let mut map = ShiftMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set(Vertex::new(x, y), self.rng.random_range(0..=8));
            }
        }
        readjust_all(&mut map);
        map
    }

    /// Patch newly stoned vertices: each gets a fresh non-zero direction
    /// (a just-placed stone should visibly shift), then conflicts are
    /// resolved locally.
    pub fn patch_shift_map(&mut self, map: &mut ShiftMap, changed: &[Vertex]) {
        for &vertex in changed {
            map.set(vertex, self.rng.random_range(1..=8));
            readjust(map, vertex);
        }
    }

    /// Fresh texture-variant map.
    #[must_use]
    pub fn regenerate_random_map(&mut self, width: u16, height: u16) -> RandomMap {
        let mut map = RandomMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set(Vertex::new(x, y), self.rng.random_range(0..RANDOM_VARIANTS));
            }
        }
        map
    }
}

impl Default for ShiftEngine {
    fn default() -> Self {
        Self::new()
    }
}
