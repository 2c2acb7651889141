//! Integration tests for the program grid.
//!
//! Component: Grid
//!
//! These tests verify:
//! - Loading from text and from files
//! - Out-of-range reads and growth on write
//! - Wraparound, short-row skipping and jumps

#![cfg(test)]

use std::io::Write;

use befunge::*;

// =============================================================================
// Loading
// =============================================================================

mod loading {
    use super::*;

    #[test]
    fn rows_are_right_trimmed() {
        let grid = Grid::from_text("ab  \n c\t");

        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_len(0), 2);
        assert_eq!(grid.row_len(1), 2);
        assert_eq!(grid.read(Position::new(0, 1)), Cell::BLANK);
    }

    #[test]
    fn trailing_newline_adds_empty_row() {
        let grid = Grid::from_text("ab\n");

        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_len(1), 0);
    }

    #[test]
    fn display_prints_rows() {
        let grid = Grid::from_text("ab\n c");
        assert_eq!(grid.to_string(), "ab\n c\n");
    }

    #[test]
    fn from_file_reads_lines() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "v  \r\n>@\r\n").unwrap();

        // Act
        let grid = Grid::from_file(file.path()).unwrap();

        // Assert
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_len(0), 1);
        assert_eq!(grid.read(Position::new(1, 1)), Cell::Char('@'));
    }

    #[test]
    fn missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bf");

        let err = Grid::from_file(&path).unwrap_err();

        assert!(matches!(err, FungeError::Load { .. }));
        assert_eq!(err.category(), ErrorCategory::IO);
        assert!(err.to_string().contains("missing.bf"));
    }

    #[test]
    fn empty_file_cannot_run() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let grid = Grid::from_file(file.path()).unwrap();
        assert_eq!(grid.row_count(), 0);

        let (console, captured) = Console::scripted("");
        let err = Engine::new(grid, RunConfig::default(), console).run().unwrap_err();
        assert!(matches!(err, FungeError::EmptyRow { .. }));
        assert_eq!(captured.contents(), "");
    }

    #[test]
    fn engine_from_file_starts_at_origin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "12+@").unwrap();

        let engine = Engine::from_file(file.path(), RunConfig::default()).unwrap();

        assert_eq!(engine.grid().row_count(), 1);
        assert_eq!(engine.cursors().len(), 1);
        assert_eq!(engine.cursors()[0].position, Position::ORIGIN);
        assert_eq!(engine.cursors()[0].direction, Direction::Right);
    }
}

// =============================================================================
// Cell Access
// =============================================================================

mod cell_access {
    use super::*;

    #[test]
    fn reads_outside_are_blank() {
        let grid = Grid::from_text("ab\nc");

        assert_eq!(grid.read(Position::new(1, 1)), Cell::BLANK);
        assert_eq!(grid.read(Position::new(0, 9)), Cell::BLANK);
        assert_eq!(grid, Grid::from_text("ab\nc"));
    }

    #[test]
    fn write_grows_with_padding() {
        let mut grid = Grid::from_text("ab");

        grid.write(Position::new(3, 2), 'x' as i64);

        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.row_len(0), 2);
        assert_eq!(grid.row_len(1), 0);
        assert_eq!(grid.row_len(2), 4);
        assert_eq!(grid.read(Position::new(2, 2)), Cell::BLANK);
        assert_eq!(grid.read(Position::new(3, 2)), Cell::Char('x'));
    }

    #[test]
    fn unprintable_values_are_stored_raw() {
        let mut grid = Grid::new();

        grid.write(Position::ORIGIN, 7);
        grid.write(Position::new(1, 0), 126);
        grid.write(Position::new(2, 0), 127);
        grid.write(Position::new(3, 0), -65);

        assert_eq!(grid.read(Position::ORIGIN), Cell::Int(7));
        assert_eq!(grid.read(Position::new(1, 0)), Cell::Char('~'));
        assert_eq!(grid.read(Position::new(2, 0)), Cell::Int(127));
        assert_eq!(grid.read(Position::new(3, 0)).code(), -65);
    }
}

// =============================================================================
// Movement
// =============================================================================

mod movement {
    use super::*;

    #[test]
    fn horizontal_wraps_on_row_length() {
        let grid = Grid::from_text("abc\nabcdef");

        assert_eq!(grid.advance(Position::new(2, 0), Direction::Right), Position::new(0, 0));
        assert_eq!(grid.advance(Position::new(0, 0), Direction::Left), Position::new(2, 0));
        assert_eq!(grid.advance(Position::new(2, 1), Direction::Right), Position::new(3, 1));
    }

    #[test]
    fn horizontal_on_empty_row_stays() {
        let grid = Grid::from_text("ab\n\ncd");
        assert_eq!(grid.advance(Position::new(1, 1), Direction::Right), Position::new(1, 1));
    }

    #[test]
    fn vertical_skips_short_rows() {
        let grid = Grid::from_text("^v\n\n  @\n^v");

        assert_eq!(grid.advance(Position::new(1, 0), Direction::Down), Position::new(1, 2));
        assert_eq!(grid.advance(Position::new(1, 0), Direction::Up), Position::new(1, 3));
        assert_eq!(grid.advance(Position::new(2, 2), Direction::Down), Position::new(2, 2));
        assert_eq!(grid.advance(Position::new(0, 3), Direction::Down), Position::new(0, 0));
    }

    #[test]
    fn jump_displaces_in_one_step() {
        let grid = Grid::from_text("abcdef");

        assert_eq!(grid.jump(Position::new(1, 0), Direction::Right, 3), Position::new(4, 0));
        assert_eq!(grid.jump(Position::new(1, 0), Direction::Left, 3), Position::new(4, 0));
        assert_eq!(grid.jump(Position::new(1, 0), Direction::Right, -2), Position::new(5, 0));
        assert_eq!(grid.jump(Position::new(1, 0), Direction::Right, 0), Position::new(1, 0));
    }

    #[test]
    fn vertical_jump_does_not_skip() {
        let grid = Grid::from_text("ab\n\nab");
        assert_eq!(grid.jump(Position::new(1, 0), Direction::Down, 1), Position::new(1, 1));
    }

    #[test]
    fn empty_grid_never_moves() {
        let grid = Grid::new();
        for direction in Direction::ALL {
            assert_eq!(grid.advance(Position::ORIGIN, direction), Position::ORIGIN);
        }
    }
}
