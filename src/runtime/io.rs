//! Console I/O for the interpreter.
//!
//! The engine never touches stdin or stdout directly; it goes through a
//! [`Console`], which owns a line-oriented input and an output sink. The
//! process console is [`Console::stdio`]; tests and embedders supply their
//! own reader and capture output with [`CapturedOutput`].
//!
//! # Input rules
//!
//! - `&` reads lines until one parses as an integer. Malformed lines are
//!   discarded and the read is retried; this is the only retry in the system.
//! - `~` reads one line and yields the code point of its first character. An
//!   empty line yields `10`, the newline that ended it.
//! - End of input during either read is fatal.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;

use tracing::debug;

use crate::core::error::{FungeError, FungeResult};

/// Code pushed by `~` for an empty input line.
pub const NEWLINE_CODE: i64 = '\n' as i64;

/// Line-based input plus an output sink.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Console {
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// The process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }

    /// A console reading `input` and writing into a shared buffer.
    pub fn scripted(input: &str) -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let console = Self::new(io::Cursor::new(input.as_bytes().to_vec()), captured.clone());
        (console, captured)
    }

    /// Read one line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> FungeResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Read lines until one holds a valid integer.
    pub fn read_integer(&mut self) -> FungeResult<i64> {
        loop {
            let line = self
                .read_line()?
                .ok_or(FungeError::InputExhausted { expected: "an integer" })?;
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(err) => debug!(input = %line, %err, "rejected integer input"),
            }
        }
    }

    /// Read a line and return the code point of its first character.
    pub fn read_char(&mut self) -> FungeResult<i64> {
        let line = self
            .read_line()?
            .ok_or(FungeError::InputExhausted { expected: "a character" })?;
        Ok(line.chars().next().map_or(NEWLINE_CODE, |c| c as i64))
    }

    /// Write `text` and flush so it shows up immediately.
    pub fn write_str(&mut self, text: &str) -> FungeResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Direct access to the output sink.
    pub fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }
}

/// A cloneable in-memory sink; every clone sees the same bytes.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl CapturedOutput {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
