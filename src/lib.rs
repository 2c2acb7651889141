// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Grid (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod grid;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: Runtime I/O (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod runtime;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: VM (depends on core, grid, runtime, tooling)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 4: Tooling (depends on core, grid, vm types)
// ═══════════════════════════════════════════════════════════════════════════
pub mod tooling;

pub use self::core::{Cell, Direction, ErrorCategory, FungeError, FungeResult, Position, Stack};
pub use grid::Grid;
pub use runtime::{CapturedOutput, Console};
pub use tooling::TraceRenderer;
pub use vm::{Cursor, Engine, Instruction, Mode, RunConfig};
