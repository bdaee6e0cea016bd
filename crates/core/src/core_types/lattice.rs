//! Read-only view over one grid snapshot
//!
//! Transitions only ever read through a [`Snapshot`], which borrows the
//! front buffer of the grid. Out-of-bounds neighbors do not exist; the grid
//! does not wrap.

use super::cell::Cell;

/// Offsets of the 8-neighborhood as `(dx, dy)`, row-major order
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Borrowed row-major cell matrix
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    cells: &'a [Cell],
    width: usize,
    height: usize,
}

impl<'a> Snapshot<'a> {
    /// Wrap a row-major cell slice
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != width * height`
    pub fn new(cells: &'a [Cell], width: usize, height: usize) -> Self {
        assert_eq!(cells.len(), width * height, "snapshot size mismatch");
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    /// Cell at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn get(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.width && y < self.height, "Coordinates out of bounds");
        self.cells[y * self.width + x]
    }

    /// Cell at `(x + dx, y + dy)`, or `None` if that lies outside the grid
    pub fn offset(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<Cell> {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        if nx < self.width && ny < self.height {
            Some(self.cells[ny * self.width + nx])
        } else {
            None
        }
    }

    /// In-bounds 8-neighbors of `(x, y)` as `(dx, dy, cell)`
    pub fn neighbors(self, x: usize, y: usize) -> impl Iterator<Item = (i32, i32, Cell)> + 'a {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(x, y, dx, dy).map(|cell| (dx, dy, cell)))
    }

    /// Check if any neighbor can seed regrowth (living vegetation or water)
    pub fn has_seed_source(&self, x: usize, y: usize) -> bool {
        self.neighbors(x, y).any(|(_, _, cell)| cell.is_seed_source())
    }
}
