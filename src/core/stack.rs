//! Per-cursor data stack.
//!
//! Underflow is part of the language: popping or peeking an empty stack yields
//! zero and never fails.

use std::fmt;

/// An underflow-safe LIFO stack of integers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stack {
    elements: Vec<i64>,
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Get the current depth of the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn push(&mut self, value: i64) {
        self.elements.push(value);
    }

    /// Pop the top value, or zero if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> i64 {
        self.elements.pop().unwrap_or(0)
    }

    /// Read the top value without removing it, or zero if the stack is empty.
    #[inline]
    pub fn peek(&self) -> i64 {
        self.elements.last().copied().unwrap_or(0)
    }

    /// Push a copy of the top value. An empty stack gains a zero.
    pub fn dup(&mut self) {
        let top = self.peek();
        self.push(top);
    }

    /// Pop a then b, push a then b.
    pub fn swap(&mut self) {
        let a = self.pop();
        let b = self.pop();
        self.push(a);
        self.push(b);
    }

    /// Clear the stack.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Bottom-to-top view of the contents.
    pub fn as_slice(&self) -> &[i64] {
        &self.elements
    }

    /// Render with values in `0..=255` shown as quoted characters.
    pub fn display_ascii(&self) -> AsciiStack<'_> {
        AsciiStack(self)
    }
}

impl From<Vec<i64>> for Stack {
    fn from(elements: Vec<i64>) -> Self {
        Self { elements }
    }
}

/// Comma separated, bottom first.
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack{:?}", self.elements)
    }
}

/// Display adapter returned by [`Stack::display_ascii`].
pub struct AsciiStack<'a>(&'a Stack);

impl fmt::Display for AsciiStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &value) in self.0.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match u8::try_from(value) {
                Ok(byte) => write_quoted(f, byte)?,
                Err(_) => write!(f, "{}", value)?,
            }
        }
        Ok(())
    }
}

/// Quote one code for the character view: single
/// quotes, `\t` `\n` `\r` and `\\` escaped, other unprintable codes as
/// `\xNN`, and the single quote itself wrapped in double quotes.
fn write_quoted(f: &mut fmt::Formatter<'_>, byte: u8) -> fmt::Result {
    match byte {
        b'\'' => f.write_str("\"'\""),
        b'\\' => f.write_str("'\\\\'"),
        b'\t' => f.write_str("'\\t'"),
        b'\n' => f.write_str("'\\n'"),
        b'\r' => f.write_str("'\\r'"),
        // Latin-1 printables, minus the soft hyphen
        0x20..=0x7e | 0xa1..=0xac | 0xae..=0xff => write!(f, "'{}'", char::from(byte)),
        _ => write!(f, "'\\x{:02x}'", byte),
    }
}
