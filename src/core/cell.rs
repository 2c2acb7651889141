//! Grid cell contents.
//!
//! Programs are loaded as characters, but `p` can store any integer into the
//! grid. Values in the printable ASCII range are stored back as characters so
//! that they stay executable; everything else is kept as a raw integer.

use std::fmt;

/// Lowest value coerced to a character by [`Cell::from_value`].
pub const PRINTABLE_MIN: i64 = 32;
/// Highest value coerced to a character by [`Cell::from_value`].
pub const PRINTABLE_MAX: i64 = 126;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// An instruction character.
    Char(char),
    /// A raw value written by `p` outside the printable range.
    Int(i64),
}

impl Cell {
    /// The blank cell: padding, out-of-range reads, and the no-op instruction.
    pub const BLANK: Cell = Cell::Char(' ');

    /// Convert a stack value into a cell, keeping printable values as characters.
    pub fn from_value(value: i64) -> Self {
        if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&value) {
            // Range-checked above, always ASCII.
            Cell::Char(value as u8 as char)
        } else {
            Cell::Int(value)
        }
    }

    /// The value this cell pushes when read as data.
    #[inline]
    pub fn code(self) -> i64 {
        match self {
            Cell::Char(c) => c as i64,
            Cell::Int(v) => v,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Char(c) => write!(f, "{}", c),
            Cell::Int(v) => write!(f, "{}", v),
        }
    }
}
