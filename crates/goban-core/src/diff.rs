#![forbid(unsafe_code)]

//! Position snapshot diffing.

use crate::grid::SignMap;
use crate::vertex::Vertex;

/// Vertices where `before` was empty and `after` holds a stone, row-major
/// ascending.
///
/// Dimension changes are handled by full reset elsewhere, never diffed:
/// mismatched or zero-sized inputs yield an empty result because stone
/// identity cannot be assumed stable across a resize.
#[must_use]
pub fn diff_sign_maps(before: &SignMap, after: &SignMap) -> Vec<Vertex> {
    if before.is_empty() || !before.same_dimensions(after) {
        return Vec::new();
    }

    let mut result = Vec::new();
    for y in 0..before.height() {
        for x in 0..before.width() {
            let vertex = Vertex::new(x, y);
            if !before.sign(vertex).is_stone() && after.sign(vertex).is_stone() {
                result.push(vertex);
            }
        }
    }
    result
}
