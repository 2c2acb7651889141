//! Grid coordinates.
//!
//! Split out from the grid so cursors, errors and the grid can all name a
//! location without depending on each other.

use std::fmt;

/// A (column, row) coordinate into the program grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    /// Column index within the row.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
