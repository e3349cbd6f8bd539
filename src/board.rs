//! Board model: sides, pieces, squares, and the 8x8 grid.
//!
//! Pieces are tagged values rather than characters. A square is
//! `Option<Piece>`, with `None` meaning empty. Pieces only ever stand on
//! squares where `row + col` is odd; the initial layout establishes this and
//! every legal move preserves it, so nothing here checks it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DARK_KING, DARK_MAN, EMPTY, HOME_ROWS, LIGHT_KING, LIGHT_MAN, N};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Starts on rows 5-7 and moves toward row 0. Moves first.
    Light,
    /// Starts on rows 0-2 and moves toward row 7.
    Dark,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Row delta of a forward step for a man of this side.
    pub fn forward(self) -> isize {
        match self {
            Side::Light => -1,
            Side::Dark => 1,
        }
    }

    /// The far row on which a man of this side is crowned.
    pub fn promotion_row(self) -> usize {
        match self {
            Side::Light => 0,
            Side::Dark => N - 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Light => write!(f, "Light"),
            Side::Dark => write!(f, "Dark"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub fn man(side: Side) -> Self {
        Piece {
            side,
            rank: Rank::Man,
        }
    }

    pub fn king(side: Side) -> Self {
        Piece {
            side,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Diagram character for this piece.
    pub fn symbol(self) -> char {
        match (self.side, self.rank) {
            (Side::Light, Rank::Man) => LIGHT_MAN,
            (Side::Light, Rank::King) => LIGHT_KING,
            (Side::Dark, Rank::Man) => DARK_MAN,
            (Side::Dark, Rank::King) => DARK_KING,
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        match c {
            LIGHT_MAN => Some(Piece::man(Side::Light)),
            LIGHT_KING => Some(Piece::king(Side::Light)),
            DARK_MAN => Some(Piece::man(Side::Dark)),
            DARK_KING => Some(Piece::king(Side::Dark)),
            _ => None,
        }
    }
}

/// Contents of one board square.
pub type Square = Option<Piece>;

/// A square address. Both coordinates are in `0..N` for every value the
/// engine produces; `offset` is the only way to step and it never leaves
/// the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Step by `(dr, dc)`, or `None` when that leaves the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < N && col < N).then_some(Position { row, col })
    }

    /// Whether a piece can stand here (the dark squares).
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

/// A move from one square to another. Whether it is a simple move or a
/// capture is not stored; it depends on the board it is played on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// Unit diagonal step from `from` toward `to`, or `None` if the two
    /// squares are not on a common diagonal.
    pub fn direction(self) -> Option<(isize, isize)> {
        let dr = self.to.row as isize - self.from.row as isize;
        let dc = self.to.col as isize - self.from.col as isize;
        if dr == 0 || dr.abs() != dc.abs() {
            return None;
        }
        Some((dr.signum(), dc.signum()))
    }

    /// Number of diagonal steps between the endpoints.
    pub fn distance(self) -> usize {
        self.from.row.abs_diff(self.to.row)
    }
}

/// The 8x8 grid. Created once per game and mutated in place by accepted
/// moves; explicit `clone()` is the only way to get a what-if copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Square; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting layout: Dark on the three rows nearest row 0,
    /// Light on the three rows nearest row 7.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for row in 0..N {
            for col in 0..N {
                let pos = Position::new(row, col);
                if !pos.is_playable() {
                    continue;
                }
                if row < HOME_ROWS {
                    board.set(pos, Some(Piece::man(Side::Dark)));
                } else if row >= N - HOME_ROWS {
                    board.set(pos, Some(Piece::man(Side::Light)));
                }
            }
        }
        board
    }

    pub fn empty() -> Self {
        Board {
            cells: [[None; N]; N],
        }
    }

    /// Contents of `pos`. Panics if `pos` is off the board.
    pub fn get(&self, pos: Position) -> Square {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, square: Square) {
        self.cells[pos.row][pos.col] = square;
    }

    /// Remove and return whatever stands on `pos`.
    pub fn take(&mut self, pos: Position) -> Square {
        self.cells[pos.row][pos.col].take()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Squares holding a piece of `side`, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| Position::new(row, col)))
            .filter_map(move |pos| match self.get(pos) {
                Some(piece) if piece.side == side => Some((pos, piece)),
                _ => None,
            })
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} squares, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unknown square character {ch:?} at row {row}")]
    Symbol { row: usize, ch: char },
}

/// Parses the diagram form written by `Display`: one line per row, row 0
/// first, `.` for empty squares. Blank lines and surrounding whitespace are
/// ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != N {
            return Err(BoardParseError::RowCount(rows.len()));
        }
        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != N {
                return Err(BoardParseError::RowLength { row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                let square = match ch {
                    EMPTY => None,
                    _ => Some(Piece::from_symbol(ch).ok_or(BoardParseError::Symbol { row, ch })?),
                };
                board.set(Position::new(row, col), square);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for square in row {
                let ch = square.map_or(EMPTY, Piece::symbol);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PIECES_PER_SIDE;

    #[test]
    fn test_initial_layout() {
        let board = Board::new();
        assert_eq!(board.count(Side::Light), PIECES_PER_SIDE);
        assert_eq!(board.count(Side::Dark), PIECES_PER_SIDE);

        for (pos, piece) in board.pieces(Side::Dark) {
            assert!(pos.row < HOME_ROWS);
            assert!(pos.is_playable());
            assert_eq!(piece.rank, Rank::Man);
        }
        for (pos, _) in board.pieces(Side::Light) {
            assert!(pos.row >= N - HOME_ROWS);
            assert!(pos.is_playable());
        }

        // Middle two rows are empty
        for col in 0..N {
            assert!(board.is_empty(Position::new(3, col)));
            assert!(board.is_empty(Position::new(4, col)));
        }
    }

    #[test]
    fn test_diagram_roundtrip() {
        let board = Board::new();
        let text = board.to_string();
        assert_eq!(text.lines().next(), Some(".d.d.d.d"));
        assert_eq!(text.lines().last(), Some("l.l.l.l."));
        let parsed: Board = text.parse().unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "........".parse::<Board>(),
            Err(BoardParseError::RowCount(1))
        );

        let short = "........\n".repeat(7) + ".......";
        assert_eq!(
            short.parse::<Board>(),
            Err(BoardParseError::RowLength { row: 7, len: 7 })
        );

        let bad = "...q....\n".to_string() + &"........\n".repeat(7);
        assert_eq!(
            bad.parse::<Board>(),
            Err(BoardParseError::Symbol { row: 0, ch: 'q' })
        );
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Position::new(1, 1)));

        let far = Position::new(7, 7);
        assert_eq!(far.offset(1, -1), None);
        assert_eq!(far.offset(-7, -7), Some(corner));
    }

    #[test]
    fn test_move_geometry() {
        let mv = Move::new(Position::new(0, 0), Position::new(4, 4));
        assert_eq!(mv.direction(), Some((1, 1)));
        assert_eq!(mv.distance(), 4);

        let sideways = Move::new(Position::new(2, 1), Position::new(2, 3));
        assert_eq!(sideways.direction(), None);
    }

    #[test]
    fn test_take_empties_square() {
        let mut board = Board::new();
        let pos = Position::new(0, 1);
        assert_eq!(board.take(pos), Some(Piece::man(Side::Dark)));
        assert!(board.is_empty(pos));
        assert_eq!(board.take(pos), None);
    }

    #[test]
    fn test_side_directions() {
        assert_eq!(Side::Light.opponent(), Side::Dark);
        assert_eq!(Side::Light.forward(), -1);
        assert_eq!(Side::Dark.forward(), 1);
        assert_eq!(Side::Light.promotion_row(), 0);
        assert_eq!(Side::Dark.promotion_row(), 7);
    }
}
