#![forbid(unsafe_code)]

//! Visible coordinate ranges for partial-board display.

/// Inclusive `[start, stop]` coordinate span along one axis.
///
/// The range is interpreted against a board dimension at use time: it is
/// clamped to `[0, dim - 1]`, and an inverted or fully out-of-bounds span
/// resolves to zero visible coordinates (rendering then short-circuits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisRange {
    pub start: u16,
    pub stop: u16,
}

impl AxisRange {
    /// Create a new range. `start > stop` is allowed and yields an empty
    /// visible span.
    #[inline]
    #[must_use]
    pub const fn new(start: u16, stop: u16) -> Self {
        Self { start, stop }
    }

    /// The whole axis, whatever the board dimension turns out to be.
    #[inline]
    #[must_use]
    pub const fn full() -> Self {
        Self {
            start: 0,
            stop: u16::MAX,
        }
    }

    /// Number of visible coordinates against a board dimension.
    #[must_use]
    pub fn len(self, dim: u16) -> u16 {
        if dim == 0 || self.start > self.stop || self.start >= dim {
            return 0;
        }
        self.stop.min(dim - 1) - self.start + 1
    }

    /// Whether the clamped span is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(self, dim: u16) -> bool {
        self.len(dim) == 0
    }

    /// Index of a board coordinate within the visible span, if visible.
    #[must_use]
    pub fn index_of(self, coord: u16, dim: u16) -> Option<u16> {
        (coord < dim && coord >= self.start && coord <= self.stop.min(dim.saturating_sub(1)))
            .then(|| coord - self.start)
    }

    /// Board coordinate at a visible index, if within the span.
    #[must_use]
    pub fn coord_at(self, index: u16, dim: u16) -> Option<u16> {
        (index < self.len(dim)).then(|| self.start + index)
    }

    /// Visible board coordinates, ascending.
    pub fn coords(self, dim: u16) -> impl Iterator<Item = u16> {
        (0..self.len(dim)).map(move |i| self.start + i)
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::full()
    }
}

impl From<(u16, u16)> for AxisRange {
    fn from((start, stop): (u16, u16)) -> Self {
        Self::new(start, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::AxisRange;

    #[test]
    fn full_range_clamps_to_dimension() {
        let r = AxisRange::full();
        assert_eq!(r.len(19), 19);
        assert_eq!(r.coords(3).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn sub_range() {
        let r = AxisRange::new(2, 5);
        assert_eq!(r.len(19), 4);
        assert_eq!(r.coords(19).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(r.index_of(2, 19), Some(0));
        assert_eq!(r.index_of(5, 19), Some(3));
        assert_eq!(r.index_of(6, 19), None);
        assert_eq!(r.index_of(1, 19), None);
        assert_eq!(r.coord_at(0, 19), Some(2));
        assert_eq!(r.coord_at(3, 19), Some(5));
        assert_eq!(r.coord_at(4, 19), None);
    }

    #[test]
    fn inverted_range_is_empty() {
        let r = AxisRange::new(5, 2);
        assert_eq!(r.len(19), 0);
        assert!(r.is_empty(19));
        assert_eq!(r.index_of(3, 19), None);
    }

    #[test]
    fn out_of_bounds_range_is_empty() {
        let r = AxisRange::new(20, 25);
        assert_eq!(r.len(19), 0);
    }

    #[test]
    fn stop_clamps_to_dimension() {
        let r = AxisRange::new(17, 40);
        assert_eq!(r.len(19), 2);
        assert_eq!(r.coords(19).collect::<Vec<_>>(), vec![17, 18]);
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert_eq!(AxisRange::full().len(0), 0);
        assert_eq!(AxisRange::new(0, 0).len(0), 0);
    }
}
