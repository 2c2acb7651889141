//! The instruction table.
//!
//! Every character the grid may hold resolves to exactly one of three things:
//! an executable [`Instruction`], the reserved [`Instruction::Reserved`] entry
//! (fails as not implemented), or no entry at all (fails as illegal).

use crate::core::{Cell, Direction};

/// The jump-over marker. Never left as the cell a cursor rests on.
pub const JUMP_OVER_MARKER: char = ';';

/// Toggles literal mode.
pub const LITERAL_TOGGLE: char = '"';

/// Characters that have a table entry but no implementation.
pub const RESERVED: &[char] = &[
    '\'', '(', ')', '{', '}', '=', 'h', 'i', 'k', 'l', 'm', 'o', 'q', 'r', 's', 'u', 'x', 'y', 'z',
];

/// All instructions understood in normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    // ═══════════════════════════════════════════════════════════════════
    // Literals & Arithmetic
    // ═══════════════════════════════════════════════════════════════════

    /// Push a single hexadecimal digit value.
    /// Stack: ( -- n )
    PushDigit(u8),

    /// Stack: ( b a -- b+a )
    Add,

    /// Stack: ( b a -- b-a )
    Subtract,

    /// Stack: ( b a -- b*a )
    Multiply,

    /// Floor division; a zero divisor is fatal.
    /// Stack: ( b a -- b/a )
    Divide,

    /// Floor remainder; a zero divisor is fatal.
    /// Stack: ( b a -- b%a )
    Modulo,

    // ═══════════════════════════════════════════════════════════════════
    // Logic
    // ═══════════════════════════════════════════════════════════════════

    /// Stack: ( a -- a==0 )
    Not,

    /// Stack: ( b a -- b>a )
    Greater,

    // ═══════════════════════════════════════════════════════════════════
    // Direction
    // ═══════════════════════════════════════════════════════════════════

    /// Set the direction unconditionally.
    Go(Direction),

    /// Pop; zero goes right, anything else left.
    HorizontalIf,

    /// Pop; zero goes down, anything else up.
    VerticalIf,

    /// Pick one of the four directions at random.
    GoRandom,

    TurnLeft,
    TurnRight,

    /// Pop b then a; turn left if a<b, right if b<a.
    CompareTurn,

    // ═══════════════════════════════════════════════════════════════════
    // Cursor movement
    // ═══════════════════════════════════════════════════════════════════

    /// Skip the next cell.
    Trampoline,

    /// Move to the next jump-over marker along the current direction.
    JumpOver,

    /// Pop n and move n cells along the current direction.
    JumpForward,

    // ═══════════════════════════════════════════════════════════════════
    // Stack
    // ═══════════════════════════════════════════════════════════════════

    Duplicate,
    Swap,
    Discard,
    Clear,

    // ═══════════════════════════════════════════════════════════════════
    // I/O
    // ═══════════════════════════════════════════════════════════════════

    /// Pop and emit as decimal followed by a space.
    PrintInt,
    /// Pop and emit as a character.
    PrintChar,
    ReadInt,
    ReadChar,

    /// Stack: ( y x v -- ), write v at (x, y).
    Put,
    /// Stack: ( y x -- c ), read the cell at (x, y).
    Get,

    // ═══════════════════════════════════════════════════════════════════
    // Cursors & modes
    // ═══════════════════════════════════════════════════════════════════

    /// Spawn a cursor travelling the opposite way.
    Fork,
    Halt,
    ToggleLiteral,
    Nop,

    /// Present in the table but not implemented.
    Reserved(char),
}

impl Instruction {
    /// Look up the table entry for a cell. `None` means the cell is illegal.
    pub fn decode(cell: Cell) -> Option<Instruction> {
        let Cell::Char(c) = cell else {
            return None;
        };
        let instruction = match c {
            '0'..='9' | 'a'..='f' => Instruction::PushDigit(c.to_digit(16)? as u8),
            '+' => Instruction::Add,
            '-' => Instruction::Subtract,
            '*' => Instruction::Multiply,
            '/' => Instruction::Divide,
            '%' => Instruction::Modulo,
            '!' => Instruction::Not,
            '`' => Instruction::Greater,
            '>' => Instruction::Go(Direction::Right),
            '<' => Instruction::Go(Direction::Left),
            '^' => Instruction::Go(Direction::Up),
            'v' => Instruction::Go(Direction::Down),
            '_' => Instruction::HorizontalIf,
            '|' => Instruction::VerticalIf,
            '?' => Instruction::GoRandom,
            '[' => Instruction::TurnLeft,
            ']' => Instruction::TurnRight,
            'w' => Instruction::CompareTurn,
            '#' => Instruction::Trampoline,
            JUMP_OVER_MARKER => Instruction::JumpOver,
            'j' => Instruction::JumpForward,
            ':' => Instruction::Duplicate,
            '\\' => Instruction::Swap,
            '$' => Instruction::Discard,
            'n' => Instruction::Clear,
            '.' => Instruction::PrintInt,
            ',' => Instruction::PrintChar,
            '&' => Instruction::ReadInt,
            '~' => Instruction::ReadChar,
            'p' => Instruction::Put,
            'g' => Instruction::Get,
            't' => Instruction::Fork,
            '@' => Instruction::Halt,
            LITERAL_TOGGLE => Instruction::ToggleLiteral,
            ' ' => Instruction::Nop,
            c if RESERVED.contains(&c) => Instruction::Reserved(c),
            _ => return None,
        };
        Some(instruction)
    }
}
