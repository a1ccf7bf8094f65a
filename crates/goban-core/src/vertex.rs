#![forbid(unsafe_code)]

//! Board intersections.

use smallvec::SmallVec;

/// One addressable intersection on the board, 0-indexed from the top-left.
///
/// Field order is `y` before `x` so the derived ordering is row-major
/// (y outer, x inner), matching diff output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Vertex {
    pub y: u16,
    pub x: u16,
}

impl Vertex {
    /// Create a new vertex.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The vertex itself plus its orthogonal neighbors, clamped to a
    /// `width × height` board. Used to grow the shifting set around a
    /// newly placed stone.
    #[must_use]
    pub fn neighborhood(self, width: u16, height: u16) -> SmallVec<[Vertex; 5]> {
        let mut out = SmallVec::new();
        if self.x >= width || self.y >= height {
            return out;
        }
        out.push(self);
        if self.x > 0 {
            out.push(Vertex::new(self.x - 1, self.y));
        }
        if self.x + 1 < width {
            out.push(Vertex::new(self.x + 1, self.y));
        }
        if self.y > 0 {
            out.push(Vertex::new(self.x, self.y - 1));
        }
        if self.y + 1 < height {
            out.push(Vertex::new(self.x, self.y + 1));
        }
        out
    }
}

impl From<(u16, u16)> for Vertex {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}
