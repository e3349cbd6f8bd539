//! External square and move notation.
//!
//! Squares are written as a file letter `a`-`h` followed by a rank digit
//! `1`-`8`. The file letter is the column; the rank digit maps to
//! `row = 8 - rank`, so rank 8 is row 0 (Dark's home side). Moves are two
//! squares joined by `-` or `x`, e.g. `c3-d4` or `c3xe5`.
//!
//! Display orientation (a rotated board for Dark) never changes this mapping.

use std::fmt;

use thiserror::Error;

use crate::board::{Move, Position};
use crate::constants::N;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected a square like c3, got {0:?}")]
    Square(String),
    #[error("file {0:?} is not between a and h")]
    File(char),
    #[error("rank {0:?} is not between 1 and 8")]
    Rank(char),
    #[error("expected a move like c3-d4, got {0:?}")]
    Move(String),
}

/// Parse a square such as `"c3"` (case-insensitive file letter).
pub fn parse_square(s: &str) -> Result<Position, NotationError> {
    let mut chars = s.trim().chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(NotationError::Square(s.to_string()));
    };

    let file = file.to_ascii_lowercase();
    if !('a'..='h').contains(&file) {
        return Err(NotationError::File(file));
    }
    let digit = rank
        .to_digit(10)
        .filter(|d| (1..=N as u32).contains(d))
        .ok_or(NotationError::Rank(rank))?;

    let col = file as usize - 'a' as usize;
    let row = N - digit as usize;
    Ok(Position::new(row, col))
}

/// Format a square as file letter plus rank digit.
pub fn square_name(pos: Position) -> String {
    let file = (b'a' + pos.col as u8) as char;
    format!("{file}{}", N - pos.row)
}

/// Parse a move such as `"c3-d4"` or `"c3xe5"`.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let s = s.trim();
    let Some((from, to)) = s.split_once(['-', 'x', 'X']) else {
        return Err(NotationError::Move(s.to_string()));
    };
    if from.len() != 2 || to.len() != 2 {
        return Err(NotationError::Move(s.to_string()));
    }
    Ok(Move::new(parse_square(from)?, parse_square(to)?))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_name(*self))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Join moves as `"c3-d4, e3-f4"` for messages.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
