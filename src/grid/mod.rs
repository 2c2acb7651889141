//! The program grid.
//!
//! A grid is a jagged sequence of rows: each row is only as long as its
//! right-trimmed source line, and rows never shrink. Reads outside the stored
//! cells see a blank; writes outside them grow the grid just far enough to
//! hold the new cell.
//!
//! # Addressing
//!
//! Horizontal movement wraps around the length of the row the cursor is on.
//! Vertical movement wraps around the row count and then keeps stepping in
//! the same direction past every row too short to have a cell at the
//! cursor's column. That skip never gives up: a column that is blank in
//! every row loops forever, which is the language's behaviour.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::{Cell, Direction, FungeError, FungeResult, Position};

/// Jagged, self-modifiable program storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an empty grid with no rows.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a grid from program text.
    ///
    /// The text is split on `'\n'` (so a trailing newline yields a trailing
    /// empty row) and every row is trimmed of trailing whitespace. Leading and
    /// interior whitespace is kept as addressable blank cells.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    /// Load a program file, one row per line.
    pub fn from_file(path: impl AsRef<Path>) -> FungeResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| FungeError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_lines(source.lines()))
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let rows = lines
            .map(|line| line.trim_end().chars().map(Cell::Char).collect())
            .collect();
        Self { rows }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Dimensions
    // ═══════════════════════════════════════════════════════════════════

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of row `y`, zero for rows that do not exist.
    #[inline]
    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cell access
    // ═══════════════════════════════════════════════════════════════════

    /// Read the cell at `pos`, or a blank if `pos` lies outside the stored cells.
    #[inline]
    pub fn read(&self, pos: Position) -> Cell {
        self.rows
            .get(pos.y)
            .and_then(|row| row.get(pos.x))
            .copied()
            .unwrap_or(Cell::BLANK)
    }

    /// Store `value` at `pos`, growing the grid with blank padding as needed.
    ///
    /// Printable values are stored as characters, anything else as a raw
    /// integer (see [`Cell::from_value`]). Existing cells other than the target
    /// are never altered.
    pub fn write(&mut self, pos: Position, value: i64) {
        self.write_cell(pos, Cell::from_value(value));
    }

    /// Store a cell verbatim at `pos`, growing the grid as [`Grid::write`] does.
    pub fn write_cell(&mut self, pos: Position, cell: Cell) {
        if pos.y >= self.rows.len() {
            self.rows.resize_with(pos.y + 1, Vec::new);
        }
        let row = &mut self.rows[pos.y];
        if pos.x >= row.len() {
            row.resize(pos.x + 1, Cell::BLANK);
        }
        row[pos.x] = cell;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Movement
    // ═══════════════════════════════════════════════════════════════════

    /// One step from `pos` in `direction`, with wraparound and short-row skipping.
    ///
    /// A horizontal step on a zero-length row leaves the column where it is.
    pub fn advance(&self, pos: Position, direction: Direction) -> Position {
        let step = step_of(direction);
        if direction.is_horizontal() {
            return Position::new(wrap(pos.x, step, self.row_len(pos.y)), pos.y);
        }

        let rows = self.row_count();
        if rows == 0 {
            return pos;
        }
        let mut y = wrap(pos.y, step, rows);
        while pos.x >= self.row_len(y) {
            y = wrap(y, step, rows);
        }
        Position::new(pos.x, y)
    }

    /// Displace `pos` by `n` cells in `direction` in a single step.
    ///
    /// Uses the same wrap rules as [`Grid::advance`] but performs no short-row
    /// skipping; a negative `n` moves backwards.
    pub fn jump(&self, pos: Position, direction: Direction, n: i64) -> Position {
        let delta = step_of(direction).wrapping_mul(n);
        if direction.is_horizontal() {
            Position::new(wrap(pos.x, delta, self.row_len(pos.y)), pos.y)
        } else {
            Position::new(pos.x, wrap(pos.y, delta, self.row_count()))
        }
    }
}

#[inline]
fn step_of(direction: Direction) -> i64 {
    match direction {
        Direction::Right | Direction::Down => 1,
        Direction::Left | Direction::Up => -1,
    }
}

/// `(index + delta) mod len`, always non-negative. A zero `len` leaves `index` as is.
fn wrap(index: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return index;
    }
    let len = len as i64;
    let base = (index as i64).rem_euclid(len);
    (base + delta % len).rem_euclid(len) as usize
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
