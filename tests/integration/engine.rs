//! Integration tests for the execution engine.
//!
//! Component: Engine
//!
//! These tests verify:
//! - Stack instructions and underflow
//! - Literal mode
//! - Grid put/get, including coordinates outside the grid
//! - Console input and output
//! - Fatal errors

#![cfg(test)]

use crate::common::*;

use befunge::*;

// =============================================================================
// Stack Instructions
// =============================================================================

mod stack_instructions {
    use super::*;

    #[test]
    fn dup_on_empty_pushes_zero() {
        let mut engine = engine(":");
        engine.tick().unwrap();
        assert_eq!(stack_of(&engine), vec![0]);
    }

    #[test]
    fn swap_with_one_value_fills_zero() {
        let mut engine = engine("5\\");
        engine.step(2).unwrap();
        assert_eq!(stack_of(&engine), vec![5, 0]);
    }

    #[test]
    fn clear_empties_stack() {
        let mut engine = engine("123n");
        engine.step(4).unwrap();
        assert!(stack_of(&engine).is_empty());
    }

    #[test]
    fn arithmetic_on_empty_stack_uses_zeros() {
        let mut engine = engine("+5-");
        engine.step(3).unwrap();
        // 0 + 0, then 0 - 5
        assert_eq!(stack_of(&engine), vec![-5]);
    }

    #[test]
    fn division_rounds_down() {
        let mut engine = engine("01-2/2*");
        engine.step(7).unwrap();
        // floor(-1 / 2) = -1
        assert_eq!(stack_of(&engine), vec![-2]);
    }
}

// =============================================================================
// Literal Mode
// =============================================================================

mod literal_mode {
    use super::*;

    #[test]
    fn pushes_codes_including_blanks() {
        let mut engine = engine("\"a b\"");
        engine.step(5).unwrap();

        assert_eq!(stack_of(&engine), vec![97, 32, 98]);
        assert_eq!(engine.cursors()[0].mode, Mode::Normal);
    }

    #[test]
    fn instructions_are_not_executed() {
        let mut engine = engine("\"@Q\"1");
        engine.step(5).unwrap();

        assert!(!engine.is_finished());
        assert_eq!(stack_of(&engine), vec!['@' as i64, 'Q' as i64, 1]);
    }
}

// =============================================================================
// Grid Access
// =============================================================================

mod grid_access {
    use super::*;

    #[test]
    fn put_outside_grid_is_ignored() {
        let code = "001-5p@";
        let mut engine = engine(code);
        engine.run().unwrap();
        assert_eq!(engine.grid(), &Grid::from_text(code));
    }

    #[test]
    fn get_outside_grid_reads_blank() {
        let mut negative = engine("001-g");
        negative.step(5).unwrap();
        assert_eq!(stack_of(&negative), vec![32]);

        let mut beyond = engine("99g");
        beyond.step(3).unwrap();
        assert_eq!(stack_of(&beyond), vec![32]);
    }

    #[test]
    fn raw_cells_round_trip_and_are_illegal() {
        let mut engine = engine("007p00g");
        engine.step(7).unwrap();
        assert_eq!(engine.grid().read(Position::ORIGIN), Cell::Int(7));
        assert_eq!(stack_of(&engine), vec![7]);

        // Wrapped back onto the overwritten cell
        let err = engine.tick().unwrap_err();
        assert!(matches!(err, FungeError::IllegalInstruction { cell: Cell::Int(7), .. }));
    }
}

// =============================================================================
// Console I/O
// =============================================================================

mod console {
    use super::*;

    #[test]
    fn integer_input_retries_until_valid() {
        let (mut engine, _) = engine_with_input("&&", "abc\n-5\n 3 \n");
        engine.step(2).unwrap();
        assert_eq!(stack_of(&engine), vec![-5, 3]);
    }

    #[test]
    fn empty_line_reads_as_newline() {
        let (mut engine, _) = engine_with_input("~~", "\né\n");
        engine.step(2).unwrap();
        assert_eq!(stack_of(&engine), vec![10, 233]);
    }

    #[test]
    fn end_of_input_is_fatal() {
        let err = run_err("&");
        assert!(matches!(err, FungeError::InputExhausted { .. }));
        assert_eq!(err.category(), ErrorCategory::IO);

        let err = run_err("~");
        assert!(matches!(err, FungeError::InputExhausted { expected: "a character" }));
    }

    #[test]
    fn invalid_code_point_prints_replacement() {
        assert_eq!(run("01-,@"), "\u{FFFD}\n");
    }

    #[test]
    fn integers_print_with_trailing_space() {
        assert_eq!(run("0.9.01-.@"), "0 9 -1 \n");
    }
}

// =============================================================================
// Fatal Errors
// =============================================================================

mod fatal_errors {
    use super::*;

    #[test]
    fn every_reserved_character_is_not_implemented() {
        for &c in vm::RESERVED {
            let err = run_err(&c.to_string());
            assert!(
                matches!(err, FungeError::NotImplemented { cell: Cell::Char(found), .. } if found == c),
                "{:?}",
                c
            );
        }
    }

    #[test]
    fn unknown_character_is_illegal() {
        let err = run_err("1A");
        assert!(matches!(err, FungeError::IllegalInstruction { cell: Cell::Char('A'), .. }));
        assert_eq!(err.location(), Some(Position::new(1, 0)));
    }

    #[test]
    fn empty_program_fails_instead_of_spinning() {
        // Arrange
        let mut engine = Engine::from_text("", test_config());

        // Act
        let err = engine.run().unwrap_err();

        // Assert
        assert!(matches!(err, FungeError::EmptyRow { direction: Direction::Right, .. }));
        assert_eq!(err.location(), Some(Position::ORIGIN));
        assert_eq!(engine.ticks(), 1);
        assert_eq!(engine.config(), &test_config());
    }

    #[test]
    fn one_failing_cursor_aborts_all() {
        // The child runs into the zero divisor, the parent would have halted
        let err = run_err("t@/");
        assert!(matches!(err, FungeError::DivisionByZero { .. }));
    }
}
