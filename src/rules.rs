//! Move legality, capture application, promotion, and end-of-game detection.
//!
//! The mandatory capture rule lives in `check_move`: when the side to move
//! has any capture on the board, only captures are legal. A capture that
//! leaves further captures available for the same piece starts a
//! [`CaptureChain`], which accepts only those follow-up jumps until the
//! piece runs out of them.

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Move, Piece, Position, Rank, Side};
use crate::movegen::{captures, has_any_move, simple_moves};
use crate::notation::format_moves;

/// Why a proposed move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Neither a pending capture nor a valid simple move.
    #[error("illegal move {0}")]
    IllegalMove(Move),
    /// A capture is available (or a chain must continue) and the move is
    /// not one of the captures in `options`.
    #[error("capture required, {mv} is not one of: {}", format_moves(.options))]
    CaptureRequired { mv: Move, options: Vec<Move> },
    #[error("the game is over, {winner} won")]
    GameOver { winner: Side },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Simple,
    Capture,
}

/// How `mv` would be played by `side` on this board, ignoring the
/// mandatory capture rule. `None` if it is neither a simple move nor a
/// capture for the piece on `mv.from`.
pub fn classify(board: &Board, side: Side, mv: Move) -> Option<MoveKind> {
    if captures(board, side, Some(mv.from)).contains(&mv) {
        Some(MoveKind::Capture)
    } else if simple_moves(board, side).contains(&mv) {
        Some(MoveKind::Simple)
    } else {
        None
    }
}

/// Legality gate for a top-level move (not a chain continuation).
///
/// If `side` has any capture anywhere, `mv` must be one of them and a
/// non-member is reported as `CaptureRequired` with the full capture set.
/// Otherwise `mv` must be one of the simple moves.
pub fn check_move(board: &Board, side: Side, mv: Move) -> Result<MoveKind, MoveError> {
    let options = captures(board, side, None);
    if !options.is_empty() {
        debug!(%side, captures = %format_moves(&options), "mandatory capture");
        if options.contains(&mv) {
            return Ok(MoveKind::Capture);
        }
        return Err(MoveError::CaptureRequired { mv, options });
    }
    if simple_moves(board, side).contains(&mv) {
        Ok(MoveKind::Simple)
    } else {
        Err(MoveError::IllegalMove(mv))
    }
}

pub fn is_legal(board: &Board, side: Side, mv: Move) -> bool {
    check_move(board, side, mv).is_ok()
}

/// Crown a man standing on its side's far row. Returns whether a promotion
/// happened; kings and empty squares are left alone.
pub fn maybe_promote(board: &mut Board, pos: Position) -> bool {
    match board.get(pos) {
        Some(piece) if piece.rank == Rank::Man && pos.row == piece.side.promotion_row() => {
            board.set(pos, Some(Piece::king(piece.side)));
            true
        }
        _ => false,
    }
}

/// Play a non-capturing move and run the promotion check on the landing
/// square. The move must already have passed the legality gate.
pub fn apply_simple(board: &mut Board, mv: Move) -> bool {
    let piece = board.take(mv.from);
    board.set(mv.to, piece);
    maybe_promote(board, mv.to)
}

/// Play a capture: move the piece and remove the single opponent piece
/// between the endpoints. Returns the square of the removed piece.
///
/// Does not run the promotion check; callers do that before looking for
/// continuation captures. Fails without touching the board if `mv` is not
/// a diagonal with exactly one opponent piece between the endpoints and an
/// empty landing square, or if a man's landing is not two squares away.
pub fn apply_capture(board: &mut Board, mv: Move) -> Result<Position, MoveError> {
    let illegal = MoveError::IllegalMove(mv);
    let Some(piece) = board.get(mv.from) else {
        return Err(illegal);
    };
    let Some((dr, dc)) = mv.direction() else {
        return Err(illegal);
    };
    if piece.rank == Rank::Man && mv.distance() != 2 {
        return Err(illegal);
    }
    if !board.is_empty(mv.to) {
        return Err(illegal);
    }

    let mut jumped = None;
    let mut next = mv.from.offset(dr, dc);
    while let Some(pos) = next {
        if pos == mv.to {
            break;
        }
        if let Some(other) = board.get(pos) {
            if other.side == piece.side || jumped.is_some() {
                return Err(illegal);
            }
            jumped = Some(pos);
        }
        next = pos.offset(dr, dc);
    }
    let Some(jumped) = jumped else {
        return Err(illegal);
    };

    board.take(jumped);
    board.take(mv.from);
    board.set(mv.to, Some(piece));
    Ok(jumped)
}

/// Captures the piece on `landing` must continue with. Runs the promotion
/// check first, so a man that has just reached the far row continues with
/// king geometry.
pub fn continue_chain(board: &mut Board, side: Side, landing: Position) -> Vec<Move> {
    maybe_promote(board, landing);
    captures(board, side, Some(landing))
}

/// State of one piece's sequence of forced jumps within a single turn.
///
/// Lives only while the turn is being resolved. The board is passed in to
/// each step rather than held, so the owner of the board stays in control
/// of every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureChain {
    side: Side,
    square: Position,
    promoted: bool,
    captured: Vec<Position>,
    options: Vec<Move>,
}

impl CaptureChain {
    /// Play the opening capture of a turn and work out whether the piece
    /// must keep jumping. `mv` should have been accepted by `check_move`.
    pub fn begin(board: &mut Board, side: Side, mv: Move) -> Result<Self, MoveError> {
        let mut chain = CaptureChain {
            side,
            square: mv.from,
            promoted: false,
            captured: Vec::new(),
            options: Vec::new(),
        };
        chain.jump(board, mv)?;
        Ok(chain)
    }

    /// Play the next jump. Only moves from `options()` are accepted.
    pub fn advance(&mut self, board: &mut Board, mv: Move) -> Result<Position, MoveError> {
        if !self.options.contains(&mv) {
            return Err(MoveError::CaptureRequired {
                mv,
                options: self.options.clone(),
            });
        }
        self.jump(board, mv)
    }

    fn jump(&mut self, board: &mut Board, mv: Move) -> Result<Position, MoveError> {
        let was_king = board.get(mv.from).is_some_and(Piece::is_king);
        let jumped = apply_capture(board, mv)?;
        self.square = mv.to;
        self.captured.push(jumped);
        self.options = continue_chain(board, self.side, mv.to);
        if !was_king && board.get(mv.to).is_some_and(Piece::is_king) {
            self.promoted = true;
        }
        if !self.options.is_empty() {
            debug!(
                side = %self.side,
                square = %self.square,
                options = %format_moves(&self.options),
                "capture chain continues"
            );
        }
        Ok(jumped)
    }

    /// Follow-up captures the piece must choose from. Empty once the chain
    /// is complete.
    pub fn options(&self) -> &[Move] {
        &self.options
    }

    pub fn is_complete(&self) -> bool {
        self.options.is_empty()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Square of the capturing piece.
    pub fn square(&self) -> Position {
        self.square
    }

    /// Whether the piece was crowned during this chain.
    pub fn promoted(&self) -> bool {
        self.promoted
    }

    /// Squares of the pieces removed so far, in order.
    pub fn captured(&self) -> &[Position] {
        &self.captured
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Side),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_))
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::Won(side) => Some(side),
            GameStatus::InProgress => None,
        }
    }
}

/// Check whether the opponent of `just_moved` has lost: no pieces left, or
/// no capture and no simple move available. There is no draw rule.
pub fn is_game_over(board: &Board, just_moved: Side) -> GameStatus {
    let opponent = just_moved.opponent();
    if board.count(opponent) == 0 || !has_any_move(board, opponent) {
        GameStatus::Won(just_moved)
    } else {
        GameStatus::InProgress
    }
}
