//! Step tracing.
//!
//! Renders the whole program state between ticks: the grid with every live
//! cursor's cell highlighted, each cursor's stack in numeric and character
//! form, and the output accumulated so far.

use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Write};

use crossterm::style::{Color, ContentStyle, Stylize};

use crate::core::Position;
use crate::grid::Grid;
use crate::vm::Cursor;

/// Width of the divider printed above each frame.
pub const DIVIDER_WIDTH: usize = 80;

/// Writes trace frames, optionally with ANSI colours.
#[derive(Debug, Clone, Copy)]
pub struct TraceRenderer {
    color: bool,
}

impl TraceRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Write one frame.
    pub fn render(
        &self,
        out: &mut dyn Write,
        grid: &Grid,
        cursors: &[Cursor],
        output_log: &str,
    ) -> io::Result<()> {
        let divider = "#".repeat(DIVIDER_WIDTH);
        self.paint(out, divider, ContentStyle::new().blue())?;
        writeln!(out)?;
        self.paint(out, "Code:", label_style())?;
        writeln!(out)?;

        let highlighted: HashSet<Position> = cursors.iter().map(|c| c.position).collect();
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if highlighted.contains(&Position::new(x, y)) {
                    self.paint(out, cell, cursor_style())?;
                } else {
                    write!(out, "{}", cell)?;
                }
            }
            writeln!(out)?;
        }

        for cursor in cursors {
            self.paint(out, "Stack N:", label_style())?;
            writeln!(out, " {}", cursor.stack)?;
            self.paint(out, "Stack A:", label_style())?;
            writeln!(out, " {}", cursor.stack.display_ascii())?;
        }

        self.paint(out, "Stdout:", label_style())?;
        writeln!(out, " {}", output_log)?;
        out.flush()
    }

    fn paint(&self, out: &mut dyn Write, text: impl Display, style: ContentStyle) -> io::Result<()> {
        if self.color {
            write!(out, "{}", style.apply(text))
        } else {
            write!(out, "{}", text)
        }
    }
}

fn label_style() -> ContentStyle {
    ContentStyle::new().dark_yellow()
}

fn cursor_style() -> ContentStyle {
    ContentStyle {
        foreground_color: Some(Color::Black),
        background_color: Some(Color::Green),
        ..ContentStyle::default()
    }
}
