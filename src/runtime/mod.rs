//! Runtime layer.
//!
//! - **IO**: line-based console input and the output sink

pub mod io;

pub use io::{CapturedOutput, Console};
