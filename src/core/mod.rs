//! Core types for the interpreter.
//!
//! This module defines the leaf data types everything else is built from:
//!
//! - **Position**: (column, row) grid coordinates
//! - **Direction**: compass directions and their rotation tables
//! - **Cell**: grid contents, character or raw integer
//! - **Stack**: underflow-safe integer stack
//! - **Error**: fatal interpreter conditions
//!
//! # Layer 0 - No Internal Dependencies

pub mod cell;
pub mod direction;
pub mod error;
pub mod position;
pub mod stack;

pub use cell::Cell;
pub use direction::Direction;
pub use error::{ErrorCategory, FungeError, FungeResult};
pub use position::Position;
pub use stack::Stack;
