//! Move generation for simple moves and single-jump captures.
//!
//! All functions here take the board by shared reference and never mutate
//! it. Results are returned in a fixed order: source squares row-major, then
//! `DIAGONALS` order, then increasing distance, so two calls on the same
//! board always return identical vectors.

use crate::board::{Board, Move, Piece, Position, Rank, Side};
use crate::constants::DIAGONALS;

/// All non-capturing moves for `side`.
///
/// A man steps one square diagonally forward onto an empty square. A king
/// slides any distance along any diagonal while every square on the way,
/// including the destination, is empty.
pub fn simple_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces(side) {
        match piece.rank {
            Rank::Man => man_steps(board, from, side, &mut moves),
            Rank::King => king_slides(board, from, &mut moves),
        }
    }
    moves
}

/// All single-jump captures for `side`, or only those of the piece on
/// `only_from` when given.
///
/// `only_from` is used to test whether a piece that has just captured must
/// continue. If it names a square without a piece of `side`, the result is
/// empty.
pub fn captures(board: &Board, side: Side, only_from: Option<Position>) -> Vec<Move> {
    let mut moves = Vec::new();
    match only_from {
        Some(from) => {
            if let Some(piece) = board.get(from).filter(|p| p.side == side) {
                piece_captures(board, from, piece, &mut moves);
            }
        }
        None => {
            for (from, piece) in board.pieces(side) {
                piece_captures(board, from, piece, &mut moves);
            }
        }
    }
    moves
}

/// The moves `side` may choose from this turn: the captures if there are
/// any, otherwise the simple moves.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let moves = captures(board, side, None);
    if moves.is_empty() {
        simple_moves(board, side)
    } else {
        moves
    }
}

/// Whether `side` has any move at all.
pub fn has_any_move(board: &Board, side: Side) -> bool {
    !captures(board, side, None).is_empty() || !simple_moves(board, side).is_empty()
}

fn piece_captures(board: &Board, from: Position, piece: Piece, out: &mut Vec<Move>) {
    match piece.rank {
        Rank::Man => man_jumps(board, from, piece.side, out),
        Rank::King => king_jumps(board, from, piece.side, out),
    }
}

fn man_steps(board: &Board, from: Position, side: Side, out: &mut Vec<Move>) {
    for dc in [-1, 1] {
        if let Some(to) = from.offset(side.forward(), dc) {
            if board.is_empty(to) {
                out.push(Move::new(from, to));
            }
        }
    }
}

fn king_slides(board: &Board, from: Position, out: &mut Vec<Move>) {
    for (dr, dc) in DIAGONALS {
        let mut next = from.offset(dr, dc);
        while let Some(to) = next {
            if !board.is_empty(to) {
                break;
            }
            out.push(Move::new(from, to));
            next = to.offset(dr, dc);
        }
    }
}

/// A man jumps an adjacent opponent piece in any of the four diagonal
/// directions, landing on the empty square directly beyond it.
fn man_jumps(board: &Board, from: Position, side: Side, out: &mut Vec<Move>) {
    for (dr, dc) in DIAGONALS {
        let Some(over) = from.offset(dr, dc) else {
            continue;
        };
        let Some(to) = over.offset(dr, dc) else {
            continue;
        };
        let jumpable = matches!(board.get(over), Some(p) if p.side != side);
        if jumpable && board.is_empty(to) {
            out.push(Move::new(from, to));
        }
    }
}

/// A king scans each diagonal past empty squares to the nearest piece. If
/// that piece is an opponent's, every empty square in the unbroken run
/// directly beyond it is a landing. A second opponent piece after that run
/// voids the whole ray: only one piece may be jumped per capture and the
/// king may not line up a double jump. An own piece just ends the run.
fn king_jumps(board: &Board, from: Position, side: Side, out: &mut Vec<Move>) {
    for (dr, dc) in DIAGONALS {
        let mut next = from.offset(dr, dc);
        let over = loop {
            match next {
                Some(pos) if board.is_empty(pos) => next = pos.offset(dr, dc),
                other => break other,
            }
        };
        let Some(over) = over else {
            continue;
        };
        if !matches!(board.get(over), Some(p) if p.side != side) {
            continue;
        }

        let mut landings = Vec::new();
        let mut blocked = false;
        let mut next = over.offset(dr, dc);
        while let Some(to) = next {
            match board.get(to) {
                None => landings.push(to),
                Some(p) => {
                    blocked = p.side != side;
                    break;
                }
            }
            next = to.offset(dr, dc);
        }

        if !blocked {
            out.extend(landings.into_iter().map(|to| Move::new(from, to)));
        }
    }
}
