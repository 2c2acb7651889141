//! Virtual machine for grid programs.
//!
//! - **opcode**: the character → instruction table
//! - **cursor**: per-cursor execution state (stack, position, direction, mode)
//! - **engine**: the grid owner and cooperative tick scheduler
//!
//! # Architecture
//!
//! Cursors are a scheduling abstraction, not threads. Within one tick every
//! cursor live at tick start executes one instruction and moves, strictly in
//! list order, so a run is fully deterministic for a given seed and input.

pub mod cursor;
pub mod engine;
pub mod opcode;

pub use cursor::{Cursor, Mode};
pub use engine::{Engine, RunConfig};
pub use opcode::{Instruction, JUMP_OVER_MARKER, LITERAL_TOGGLE, RESERVED};
