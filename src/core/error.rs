//! Error types for the interpreter.
//!
//! Every variant is fatal: one cursor failing aborts the whole run. An empty
//! stack is not an error, popping it yields zero.
//!
//! # Error Categories
//!
//! - **Instruction**: the grid holds something the table cannot execute
//! - **Arithmetic**: zero divisor for `/` or `%`, or a move that has to wrap
//!   around zero cells
//! - **IO**: program loading and console failures

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::cell::Cell;
use super::direction::Direction;
use super::position::Position;

/// Coarse classification of a [`FungeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Instruction,
    Arithmetic,
    IO,
}

/// Fatal interpreter error.
#[derive(Debug, Error)]
pub enum FungeError {
    /// The cell has no entry in the instruction table at all.
    #[error("{location}: illegal instruction '{cell}'")]
    IllegalInstruction { cell: Cell, location: Position },

    /// The cell is a reserved instruction with no implementation.
    #[error("{location}: instruction '{cell}' is not implemented")]
    NotImplemented { cell: Cell, location: Position },

    #[error("{location}: division by zero ({dividend} / 0)")]
    DivisionByZero { dividend: i64, location: Position },

    #[error("{location}: modulo by zero ({dividend} % 0)")]
    ModuloByZero { dividend: i64, location: Position },

    /// A cursor on an empty row moved sideways, or the grid has no rows at all.
    #[error("{location}: cannot move {direction}, nothing to wrap around")]
    EmptyRow { direction: Direction, location: Position },

    /// Input ended while an instruction was waiting for a value.
    #[error("input exhausted while reading {expected}")]
    InputExhausted { expected: &'static str },

    #[error("failed to load program from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl FungeError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            FungeError::IllegalInstruction { .. } | FungeError::NotImplemented { .. } => {
                ErrorCategory::Instruction
            }
            FungeError::DivisionByZero { .. }
            | FungeError::ModuloByZero { .. }
            | FungeError::EmptyRow { .. } => ErrorCategory::Arithmetic,
            FungeError::InputExhausted { .. } | FungeError::Load { .. } | FungeError::Io(_) => {
                ErrorCategory::IO
            }
        }
    }

    /// Grid coordinate of the instruction that failed, if any.
    pub fn location(&self) -> Option<Position> {
        match self {
            FungeError::IllegalInstruction { location, .. }
            | FungeError::NotImplemented { location, .. }
            | FungeError::DivisionByZero { location, .. }
            | FungeError::ModuloByZero { location, .. }
            | FungeError::EmptyRow { location, .. } => Some(*location),
            _ => None,
        }
    }
}

pub type FungeResult<T> = Result<T, FungeError>;
