//! The execution engine.
//!
//! The engine owns the grid and the ordered list of live cursors and drives
//! them in ticks. One tick walks a snapshot of the list taken when the tick
//! starts; each cursor reads its cell, executes it (or pushes it, in literal
//! mode), then advances. Cursors forked during a tick are placed at the front
//! of the list and first run on the next tick. Terminated cursors are removed
//! once every cursor in the snapshot has moved.
//!
//! Any fatal error ends the tick immediately and is returned from
//! [`Engine::tick`] / [`Engine::run`]; there is no isolation between cursors.

use std::fmt;
use std::path::Path;
use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::core::{Cell, Direction, FungeError, FungeResult, Position};
use crate::grid::Grid;
use crate::runtime::io::Console;
use crate::tooling::trace::TraceRenderer;

use super::cursor::{Cursor, Mode};
use super::opcode::{Instruction, JUMP_OVER_MARKER, LITERAL_TOGGLE};

/// Run parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Upper bound on ticks per second; 0 runs unthrottled.
    pub ops_per_second: u32,
    /// Render a trace frame before every tick. Program output is buffered
    /// into the output log instead of being written immediately.
    pub show_steps: bool,
    /// Seed for `?`. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Use ANSI colours in trace frames.
    pub color: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ops_per_second: 0,
            show_steps: false,
            seed: None,
            color: true,
        }
    }
}

/// Program state plus the scheduler for its cursors.
pub struct Engine {
    grid: Grid,
    cursors: Vec<Cursor>,
    output_log: String,
    config: RunConfig,
    console: Console,
    rng: SmallRng,
    tracer: TraceRenderer,
    ticks: u64,
}

impl Engine {
    /// Start a program with a single cursor at the origin heading right.
    pub fn new(grid: Grid, config: RunConfig, console: Console) -> Self {
        let rng = config
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        let tracer = TraceRenderer::new(config.color);
        Self {
            grid,
            cursors: vec![Cursor::new(Position::ORIGIN, Direction::Right)],
            output_log: String::new(),
            config,
            console,
            rng,
            tracer,
            ticks: 0,
        }
    }

    /// Load program text, using the process console.
    pub fn from_text(text: &str, config: RunConfig) -> Self {
        Self::new(Grid::from_text(text), config, Console::stdio())
    }

    /// Load a program file, using the process console.
    pub fn from_file(path: impl AsRef<Path>, config: RunConfig) -> FungeResult<Self> {
        Ok(Self::new(Grid::from_file(path)?, config, Console::stdio()))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Live cursors in scheduling order.
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// Output buffered while step tracing is enabled.
    pub fn output_log(&self) -> &str {
        &self.output_log
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once no live cursors remain.
    pub fn is_finished(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Replace the random source used by `?`.
    pub fn set_rng(&mut self, rng: SmallRng) {
        self.rng = rng;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scheduling
    // ═══════════════════════════════════════════════════════════════════

    /// Run until every cursor has halted.
    pub fn run(&mut self) -> FungeResult<()> {
        info!(
            rows = self.grid.row_count(),
            ops_per_second = self.config.ops_per_second,
            show_steps = self.config.show_steps,
            "run started"
        );
        let delay = match self.config.ops_per_second {
            0 => None,
            ops => Some(Duration::from_secs_f64(1.0 / f64::from(ops))),
        };

        while !self.is_finished() {
            if self.config.show_steps {
                self.render_trace()?;
            }
            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            self.tick()?;
        }

        // Output from the final tick has not been shown yet
        if self.config.show_steps {
            self.render_trace()?;
        }
        self.console.write_str("\n")?;
        info!(ticks = self.ticks, "run finished");
        Ok(())
    }

    /// Execute up to `count` ticks, stopping early once the program finishes.
    pub fn step(&mut self, count: usize) -> FungeResult<()> {
        for _ in 0..count {
            if self.is_finished() {
                break;
            }
            self.tick()?;
        }
        Ok(())
    }

    /// Give every cursor that is live right now exactly one turn.
    pub fn tick(&mut self) -> FungeResult<()> {
        // While the snapshot runs, `self.cursors` only collects new forks.
        let mut snapshot = std::mem::take(&mut self.cursors);
        trace!(tick = self.ticks, cursors = snapshot.len(), "tick");

        let outcome = snapshot.iter_mut().try_for_each(|cursor| self.turn(cursor));

        self.cursors.append(&mut snapshot);
        self.cursors.retain(|cursor| {
            if cursor.is_terminated() {
                debug!(position = %cursor.position, "cursor terminated");
            }
            !cursor.is_terminated()
        });
        self.ticks += 1;
        outcome
    }

    /// Spawn a cursor travelling opposite to `parent`, one step past it, with
    /// an empty stack. The child goes to the front of the live list.
    pub fn fork(&mut self, parent: &Cursor) {
        let direction = parent.direction.opposite();
        let position = self.grid.advance(parent.position, direction);
        debug!(parent = %parent.position, child = %position, %direction, "cursor forked");
        self.cursors.insert(0, Cursor::new(position, direction));
    }

    /// One cursor's turn: fetch, dispatch, move.
    fn turn(&mut self, cursor: &mut Cursor) -> FungeResult<()> {
        let cell = self.grid.read(cursor.position);
        cursor.last_instruction = cell;

        match cursor.mode {
            Mode::Terminated => return Ok(()),
            Mode::Literal if cell == Cell::Char(LITERAL_TOGGLE) => cursor.toggle_literal(),
            Mode::Literal => cursor.stack.push(cell.code()),
            Mode::Normal => {
                let instruction = Instruction::decode(cell).ok_or(FungeError::IllegalInstruction {
                    cell,
                    location: cursor.position,
                })?;
                self.execute(instruction, cursor)?;
            }
        }

        cursor.position = self.next_position(cursor)?;
        // Jump-over markers cost no tick and are never rested on.
        while self.grid.read(cursor.position) == Cell::Char(JUMP_OVER_MARKER) {
            self.execute(Instruction::JumpOver, cursor)?;
            cursor.position = self.next_position(cursor)?;
        }
        Ok(())
    }

    /// One step along the cursor's heading.
    fn next_position(&self, cursor: &Cursor) -> FungeResult<Position> {
        self.ensure_room(cursor)?;
        Ok(self.grid.advance(cursor.position, cursor.direction))
    }

    /// Wrapping needs at least one cell on the axis of travel: a non-empty
    /// row when moving horizontally, a non-empty grid when moving vertically.
    fn ensure_room(&self, cursor: &Cursor) -> FungeResult<()> {
        let empty = if cursor.direction.is_horizontal() {
            self.grid.row_len(cursor.position.y) == 0
        } else {
            self.grid.row_count() == 0
        };
        if empty {
            return Err(FungeError::EmptyRow {
                direction: cursor.direction,
                location: cursor.position,
            });
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Instruction execution
    // ═══════════════════════════════════════════════════════════════════

    /// Apply one instruction to `cursor`.
    pub fn execute(&mut self, instruction: Instruction, cursor: &mut Cursor) -> FungeResult<()> {
        let location = cursor.position;

        match instruction {
            Instruction::PushDigit(digit) => cursor.stack.push(i64::from(digit)),

            Instruction::Add => {
                let (a, b) = pop_pair(cursor);
                cursor.stack.push(a.wrapping_add(b));
            }
            Instruction::Subtract => {
                let (a, b) = pop_pair(cursor);
                cursor.stack.push(b.wrapping_sub(a));
            }
            Instruction::Multiply => {
                let (a, b) = pop_pair(cursor);
                cursor.stack.push(a.wrapping_mul(b));
            }
            Instruction::Divide => {
                let (a, b) = pop_pair(cursor);
                if a == 0 {
                    return Err(FungeError::DivisionByZero { dividend: b, location });
                }
                cursor.stack.push(floor_div(b, a));
            }
            Instruction::Modulo => {
                let (a, b) = pop_pair(cursor);
                if a == 0 {
                    return Err(FungeError::ModuloByZero { dividend: b, location });
                }
                cursor.stack.push(floor_mod(b, a));
            }

            Instruction::Not => {
                let a = cursor.stack.pop();
                cursor.stack.push(i64::from(a == 0));
            }
            Instruction::Greater => {
                let (a, b) = pop_pair(cursor);
                cursor.stack.push(i64::from(b > a));
            }

            Instruction::Go(direction) => cursor.direction = direction,
            Instruction::HorizontalIf => {
                cursor.direction = if cursor.stack.pop() == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
            }
            Instruction::VerticalIf => {
                cursor.direction = if cursor.stack.pop() == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
            }
            Instruction::GoRandom => {
                cursor.direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            }
            Instruction::TurnLeft => cursor.direction = cursor.direction.turn_left(),
            Instruction::TurnRight => cursor.direction = cursor.direction.turn_right(),
            Instruction::CompareTurn => {
                let b = cursor.stack.pop();
                let a = cursor.stack.pop();
                if a < b {
                    self.execute(Instruction::TurnLeft, cursor)?;
                } else if b < a {
                    self.execute(Instruction::TurnRight, cursor)?;
                }
            }

            Instruction::Trampoline => {
                cursor.position = self.next_position(cursor)?;
            }
            Instruction::JumpOver => loop {
                cursor.position = self.next_position(cursor)?;
                if self.grid.read(cursor.position) == Cell::Char(JUMP_OVER_MARKER) {
                    break;
                }
            },
            Instruction::JumpForward => {
                let n = cursor.stack.pop();
                self.ensure_room(cursor)?;
                cursor.position = self.grid.jump(cursor.position, cursor.direction, n);
            }

            Instruction::Duplicate => cursor.stack.dup(),
            Instruction::Swap => cursor.stack.swap(),
            Instruction::Discard => {
                cursor.stack.pop();
            }
            Instruction::Clear => cursor.stack.clear(),

            Instruction::PrintInt => {
                let value = cursor.stack.pop();
                self.emit(&format!("{} ", value))?;
            }
            Instruction::PrintChar => {
                let value = cursor.stack.pop();
                let c = u32::try_from(value)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.emit(c.encode_utf8(&mut [0; 4]))?;
            }
            Instruction::ReadInt => {
                let value = self.console.read_integer()?;
                cursor.stack.push(value);
            }
            Instruction::ReadChar => {
                let value = self.console.read_char()?;
                cursor.stack.push(value);
            }

            Instruction::Put => {
                let value = cursor.stack.pop();
                let x = cursor.stack.pop();
                let y = cursor.stack.pop();
                match grid_position(x, y) {
                    Some(pos) => self.grid.write(pos, value),
                    None => warn!(x, y, value, %location, "put outside the grid ignored"),
                }
            }
            Instruction::Get => {
                let x = cursor.stack.pop();
                let y = cursor.stack.pop();
                let cell = grid_position(x, y).map_or(Cell::BLANK, |pos| self.grid.read(pos));
                cursor.stack.push(cell.code());
            }

            Instruction::Fork => self.fork(cursor),
            Instruction::Halt => cursor.terminate(),
            Instruction::ToggleLiteral => cursor.toggle_literal(),
            Instruction::Nop => {}

            Instruction::Reserved(c) => {
                return Err(FungeError::NotImplemented { cell: Cell::Char(c), location });
            }
        }
        Ok(())
    }

    /// Route program output to the log (tracing) or straight to the console.
    fn emit(&mut self, text: &str) -> FungeResult<()> {
        if self.config.show_steps {
            self.output_log.push_str(text);
            Ok(())
        } else {
            self.console.write_str(text)
        }
    }

    fn render_trace(&mut self) -> FungeResult<()> {
        self.tracer
            .render(self.console.output(), &self.grid, &self.cursors, &self.output_log)?;
        Ok(())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("grid", &self.grid)
            .field("cursors", &self.cursors)
            .field("output_log", &self.output_log)
            .field("config", &self.config)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

/// Pop a then b.
#[inline]
fn pop_pair(cursor: &mut Cursor) -> (i64, i64) {
    let a = cursor.stack.pop();
    let b = cursor.stack.pop();
    (a, b)
}

/// Quotient rounded toward negative infinity. `divisor` must be non-zero.
fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend.wrapping_div(divisor);
    let remainder = dividend.wrapping_rem(divisor);
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        quotient.wrapping_sub(1)
    } else {
        quotient
    }
}

/// Remainder with the sign of the divisor. `divisor` must be non-zero.
fn floor_mod(dividend: i64, divisor: i64) -> i64 {
    let remainder = dividend.wrapping_rem(divisor);
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        remainder + divisor
    } else {
        remainder
    }
}

/// Stack values as grid coordinates; negative values address nothing.
fn grid_position(x: i64, y: i64) -> Option<Position> {
    Some(Position::new(usize::try_from(x).ok()?, usize::try_from(y).ok()?))
}
