//! Execution contexts.

use crate::core::{Cell, Direction, Position, Stack};

/// How a cursor treats the cells it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cells are instructions.
    Normal,
    /// Cells are pushed as character codes until the next toggle.
    Literal,
    /// Absorbing; the engine removes the cursor at the end of the tick.
    Terminated,
}

/// An independent instruction pointer with its own stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub stack: Stack,
    pub position: Position,
    pub direction: Direction,
    pub mode: Mode,
    /// The cell read at the start of this cursor's most recent turn.
    pub last_instruction: Cell,
}

impl Cursor {
    /// A fresh cursor with an empty stack in normal mode.
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            stack: Stack::new(),
            position,
            direction,
            mode: Mode::Normal,
            last_instruction: Cell::BLANK,
        }
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.mode == Mode::Terminated
    }

    /// Flip between normal and literal mode. A terminated cursor stays terminated.
    pub fn toggle_literal(&mut self) {
        self.mode = match self.mode {
            Mode::Normal => Mode::Literal,
            Mode::Literal => Mode::Normal,
            Mode::Terminated => Mode::Terminated,
        };
    }

    pub fn terminate(&mut self) {
        self.mode = Mode::Terminated;
    }
}
