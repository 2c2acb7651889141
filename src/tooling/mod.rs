//! Tooling layer.
//!
//! - **Trace**: colourised dumps of the grid, cursor stacks and output log

pub mod trace;

pub use trace::TraceRenderer;
