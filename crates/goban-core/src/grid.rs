#![forbid(unsafe_code)]

//! Rectangular per-intersection storage.
//!
//! A [`Grid`] is an owned `width × height` array in row-major order. It backs
//! the position snapshot, the shift and texture maps, and the optional
//! overlay grids (markers, ghost stones, heat, paint). Reads are tolerant:
//! any out-of-bounds access returns `None` rather than panicking, so a
//! malformed or short overlay grid simply reads as "no feature there".

use crate::sign::Sign;
use crate::vertex::Vertex;

/// Owned rectangular grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u16,
    height: u16,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid filled with `T::default()`. A zero dimension yields an
    /// empty grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); usize::from(width) * usize::from(height)],
        }
    }

    /// Build from nested rows. The width is taken from the longest row;
    /// short rows are padded with `T::default()` so ragged input is
    /// tolerated instead of rejected.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len().min(usize::from(u16::MAX)) as u16;
        let width = rows
            .iter()
            .map(|row| row.len())
            .max()
            .unwrap_or(0)
            .min(usize::from(u16::MAX)) as u16;

        let mut grid = Self::new(width, height);
        for (y, row) in rows.into_iter().enumerate().take(usize::from(height)) {
            for (x, cell) in row.into_iter().enumerate().take(usize::from(width)) {
                grid.cells[y * usize::from(width) + x] = cell;
            }
        }
        grid
    }
}

impl<T> Grid<T> {
    /// Grid width in intersections.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in intersections.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether the grid has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether another grid has identical dimensions.
    #[inline]
    #[must_use]
    pub const fn same_dimensions<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Tolerant read: `None` when out of bounds.
    #[inline]
    pub fn get(&self, vertex: Vertex) -> Option<&T> {
        self.index(vertex.x, vertex.y).map(|i| &self.cells[i])
    }

    /// Tolerant read at signed coordinates, for neighbor probes that may
    /// step off the board edge.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> Option<&T> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, vertex: Vertex, value: T) {
        if let Some(i) = self.index(vertex.x, vertex.y) {
            self.cells[i] = value;
        }
    }

    /// Iterate all cells with coordinates, row-major ascending.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let y = (i / usize::from(width.max(1))) as u16;
            let x = (i % usize::from(width.max(1))) as u16;
            (Vertex::new(x, y), cell)
        })
    }
}

impl<T> Grid<Option<T>> {
    /// Read an optional-overlay cell, flattening out-of-bounds to `None`.
    #[inline]
    pub fn feature(&self, vertex: Vertex) -> Option<&T> {
        self.get(vertex).and_then(|cell| cell.as_ref())
    }
}

/// Position snapshot: a grid of occupancy signs.
pub type SignMap = Grid<Sign>;

impl SignMap {
    /// Sign at a vertex, reading out-of-bounds as empty.
    #[inline]
    #[must_use]
    pub fn sign(&self, vertex: Vertex) -> Sign {
        self.get(vertex).copied().unwrap_or(Sign::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, SignMap};
    use crate::sign::Sign;
    use crate::vertex::Vertex;

    #[test]
    fn new_is_default_filled() {
        let grid: Grid<u8> = Grid::new(3, 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(Vertex::new(2, 1)), Some(&0));
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let grid: Grid<u8> = Grid::new(3, 2);
        assert_eq!(grid.get(Vertex::new(3, 0)), None);
        assert_eq!(grid.get(Vertex::new(0, 2)), None);
        assert_eq!(grid.get_signed(-1, 0), None);
        assert_eq!(grid.get_signed(0, -1), None);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut grid: Grid<u8> = Grid::new(2, 2);
        grid.set(Vertex::new(5, 5), 9);
        assert!(grid.iter().all(|(_, &cell)| cell == 0));
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let grid = Grid::from_rows(vec![vec![1u8, 2, 3], vec![4]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(Vertex::new(2, 1)), Some(&0));
        assert_eq!(grid.get(Vertex::new(0, 1)), Some(&4));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::from_rows(vec![vec![1u8, 2], vec![3, 4]]);
        let cells: Vec<_> = grid.iter().map(|(v, &c)| (v.x, v.y, c)).collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    fn sign_map_reads_out_of_bounds_as_empty() {
        let map = SignMap::new(2, 2);
        assert_eq!(map.sign(Vertex::new(9, 9)), Sign::Empty);
    }

    #[test]
    fn feature_flattens() {
        let mut grid: Grid<Option<u8>> = Grid::new(2, 2);
        grid.set(Vertex::new(1, 1), Some(7));
        assert_eq!(grid.feature(Vertex::new(1, 1)), Some(&7));
        assert_eq!(grid.feature(Vertex::new(0, 0)), None);
        assert_eq!(grid.feature(Vertex::new(5, 5)), None);
    }

    #[test]
    fn feature_works_for_payloads_without_default() {
        use crate::marks::GhostStone;

        let mut grid: Grid<Option<GhostStone>> = Grid::new(2, 2);
        grid.set(Vertex::new(0, 1), Some(GhostStone::of(Sign::Black)));
        assert_eq!(
            grid.feature(Vertex::new(0, 1)),
            Some(&GhostStone::of(Sign::Black))
        );
        assert_eq!(grid.feature(Vertex::new(1, 0)), None);
    }
}
