//! Integration tests for draughts-rust
//!
//! Positions are written as board diagrams: one line per row, row 0 first,
//! `.` empty, `l`/`L` Light man/king, `d`/`D` Dark man/king.

use std::collections::HashSet;

use draughts_rust::board::{Board, Move, Piece, Position, Rank, Side};
use draughts_rust::movegen::{captures, legal_moves, simple_moves};
use draughts_rust::notation::{parse_square, square_name};
use draughts_rust::rules::{
    CaptureChain, GameStatus, MoveError, apply_capture, apply_simple, check_move, continue_chain,
    is_game_over, is_legal, maybe_promote,
};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn board(diagram: &str) -> Board {
    diagram.parse().expect("valid diagram")
}

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn mv(from: (usize, usize), to: (usize, usize)) -> Move {
    Move::new(pos(from.0, from.1), pos(to.0, to.1))
}

fn set(moves: &[Move]) -> HashSet<Move> {
    moves.iter().copied().collect()
}

// =============================================================================
// Scenario A: opening moves
// =============================================================================

#[test]
fn test_opening_moves_for_dark() {
    let b = Board::new();
    assert!(captures(&b, Side::Dark, None).is_empty());

    let expected = set(&[
        mv((2, 1), (3, 0)),
        mv((2, 1), (3, 2)),
        mv((2, 3), (3, 2)),
        mv((2, 3), (3, 4)),
        mv((2, 5), (3, 4)),
        mv((2, 5), (3, 6)),
        mv((2, 7), (3, 6)),
    ]);
    let moves = simple_moves(&b, Side::Dark);
    assert_eq!(moves.len(), 7);
    assert_eq!(set(&moves), expected);
}

#[test]
fn test_opening_moves_for_light() {
    let b = Board::new();
    let moves = simple_moves(&b, Side::Light);
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|m| m.from.row == 5 && m.to.row == 4));
}

// =============================================================================
// Scenario B and C: single capture, then forced continuation
// =============================================================================

const SCENARIO_B: &str = "........
                          ........
                          ........
                          ...l....
                          ....d...
                          ........
                          ........
                          ........";

#[test]
fn test_single_capture_removes_jumped_piece() {
    let mut b = board(SCENARIO_B);
    assert_eq!(captures(&b, Side::Dark, None), vec![mv((4, 4), (2, 2))]);

    let jumped = apply_capture(&mut b, mv((4, 4), (2, 2))).unwrap();
    assert_eq!(jumped, pos(3, 3));
    assert!(b.is_empty(pos(3, 3)));
    assert!(b.is_empty(pos(4, 4)));

    // Row 2 is not Dark's far row
    assert!(!maybe_promote(&mut b, pos(2, 2)));
    assert_eq!(b.get(pos(2, 2)), Some(Piece::man(Side::Dark)));
}

#[test]
fn test_continuation_after_capture() {
    let mut b = board(
        "........
         .l......
         ........
         ...l....
         ....d...
         ........
         ........
         ........",
    );
    apply_capture(&mut b, mv((4, 4), (2, 2))).unwrap();
    let options = continue_chain(&mut b, Side::Dark, pos(2, 2));
    assert_eq!(options, vec![mv((2, 2), (0, 0))]);

    apply_capture(&mut b, mv((2, 2), (0, 0))).unwrap();
    // Row 0 is Dark's own home row, so the man is not crowned there.
    assert!(!maybe_promote(&mut b, pos(0, 0)));
    assert_eq!(b.get(pos(0, 0)), Some(Piece::man(Side::Dark)));
    assert!(continue_chain(&mut b, Side::Dark, pos(0, 0)).is_empty());
    assert_eq!(b.count(Side::Light), 0);
}

#[test]
fn test_promoted_king_continues_along_diagonal() {
    // The second jump lands on row 0, Light's far row. The new king must
    // continue down the long diagonal, which a man could not do.
    let mut b = board(
        "........
         .d......
         ........
         ...d....
         ....l...
         ........
         ......d.
         ........",
    );
    let mut chain = CaptureChain::begin(&mut b, Side::Light, mv((4, 4), (2, 2))).unwrap();
    chain.advance(&mut b, mv((2, 2), (0, 0))).unwrap();
    assert!(chain.promoted());
    assert_eq!(chain.options(), &[mv((0, 0), (7, 7))]);

    chain.advance(&mut b, mv((0, 0), (7, 7))).unwrap();
    assert!(chain.is_complete());
    assert_eq!(chain.captured(), &[pos(3, 3), pos(1, 1), pos(6, 6)]);
    assert_eq!(b.count(Side::Dark), 0);
}

// =============================================================================
// Scenario D: blocked opponent
// =============================================================================

#[test]
fn test_blocked_opponent_loses() {
    let b = board(
        ".d......
         l.l.....
         ...l....
         ........
         ........
         ........
         ........
         ........",
    );
    assert_eq!(b.count(Side::Dark), 1);
    assert!(legal_moves(&b, Side::Dark).is_empty());

    let status = is_game_over(&b, Side::Light);
    assert_eq!(status, GameStatus::Won(Side::Light));
    assert!(status.is_over());
}

#[test]
fn test_eliminated_opponent_loses() {
    let b = board(
        "........
         ........
         ........
         ........
         ........
         ........
         ........
         ...D....",
    );
    assert_eq!(is_game_over(&b, Side::Dark).winner(), Some(Side::Dark));
    // The side with pieces left is not the loser
    assert_eq!(is_game_over(&b, Side::Light), GameStatus::InProgress);
}

// =============================================================================
// Scenario E: flying king captures
// =============================================================================

#[test]
fn test_king_capture_lists_every_landing() {
    let b = board(
        "L.......
         ........
         ........
         ...d....
         ........
         ........
         ........
         ........",
    );
    assert_eq!(
        captures(&b, Side::Light, None),
        vec![
            mv((0, 0), (4, 4)),
            mv((0, 0), (5, 5)),
            mv((0, 0), (6, 6)),
            mv((0, 0), (7, 7)),
        ]
    );
}

#[test]
fn test_second_piece_blocks_king_capture() {
    let b = board(
        "L.......
         ........
         ........
         ...d....
         ........
         .....d..
         ........
         ........",
    );
    assert!(captures(&b, Side::Light, None).is_empty());
}

#[test]
fn test_each_king_landing_has_its_own_continuation() {
    let b = board(
        "L.......
         ........
         ........
         ...d....
         ........
         ........
         ....d...
         ........",
    );
    let moves = captures(&b, Side::Light, None);
    assert_eq!(moves.len(), 4);

    // Only the landing on (5,5) sees the man on (6,4).
    let mut with_follow_up = Vec::new();
    for m in moves {
        let mut after = b.clone();
        apply_capture(&mut after, m).unwrap();
        let options = continue_chain(&mut after, Side::Light, m.to);
        if !options.is_empty() {
            assert_eq!(options, vec![Move::new(m.to, pos(7, 3))]);
            with_follow_up.push(m.to);
        }
    }
    assert_eq!(with_follow_up, vec![pos(5, 5)]);
}

// =============================================================================
// Legality gate
// =============================================================================

#[test]
fn test_mandatory_capture_excludes_simple_moves() {
    let b = board(
        "........
         ........
         ........
         ....d...
         ...l....
         ........
         .l......
         ........",
    );
    let caps = captures(&b, Side::Light, None);
    assert_eq!(caps, vec![mv((4, 3), (2, 5))]);

    for m in simple_moves(&b, Side::Light) {
        assert!(!is_legal(&b, Side::Light, m), "{m} should need a capture");
        assert!(matches!(
            check_move(&b, Side::Light, m),
            Err(MoveError::CaptureRequired { .. })
        ));
    }
    assert!(is_legal(&b, Side::Light, caps[0]));
}

#[test]
fn test_men_step_one_row_forward() {
    let b = Board::new();
    for side in [Side::Light, Side::Dark] {
        for m in simple_moves(&b, side) {
            assert_eq!(m.to.row as isize - m.from.row as isize, side.forward());
            assert_eq!(m.from.col.abs_diff(m.to.col), 1);
        }
    }
}

#[test]
fn test_king_slides_are_unobstructed() {
    let b = board(
        "........
         ........
         .....l..
         ........
         ...D....
         ........
         .l......
         ........",
    );
    let moves = simple_moves(&b, Side::Dark);
    assert!(!moves.is_empty());
    for m in &moves {
        let (dr, dc) = m.direction().expect("diagonal");
        let mut p = m.from;
        for _ in 0..m.distance() {
            p = p.offset(dr, dc).unwrap();
            assert!(b.is_empty(p), "{m} passes through {p}");
        }
    }
    // The Light men bound two of the rays
    assert!(!moves.contains(&mv((4, 3), (2, 5))));
    assert!(!moves.contains(&mv((4, 3), (6, 1))));
    assert!(moves.contains(&mv((4, 3), (3, 4))));
    assert_eq!(moves.len(), 8);
}

#[test]
fn test_generation_is_idempotent() {
    let b = board(
        "........
         ..d.d...
         ...L....
         ........
         .d...l..
         ........
         ...l....
         ........",
    );
    for side in [Side::Light, Side::Dark] {
        assert_eq!(simple_moves(&b, side), simple_moves(&b, side));
        assert_eq!(captures(&b, side, None), captures(&b, side, None));
    }
}

// =============================================================================
// Promotion
// =============================================================================

#[test]
fn test_promotion_is_monotonic() {
    let mut b = board(
        "L.......
         ........
         ........
         ........
         ........
         ........
         ........
         ........",
    );
    assert!(!maybe_promote(&mut b, pos(0, 0)));
    assert_eq!(b.get(pos(0, 0)).map(|p| p.rank), Some(Rank::King));

    // A king walking back to its own home row stays a king
    let mut b = board(
        "........
         ........
         ........
         ........
         ........
         ........
         ..L.....
         ........",
    );
    assert!(is_legal(&b, Side::Light, mv((6, 2), (7, 1))));
    assert!(!apply_simple(&mut b, mv((6, 2), (7, 1))));
    assert_eq!(b.get(pos(7, 1)), Some(Piece::king(Side::Light)));
}

// =============================================================================
// Notation
// =============================================================================

#[test]
fn test_notation_roundtrip_on_dark_squares() {
    for row in 0..8 {
        for col in 0..8 {
            let p = pos(row, col);
            if p.is_playable() {
                assert_eq!(parse_square(&square_name(p)), Ok(p));
            }
        }
    }
}

#[test]
fn test_notation_orientation() {
    // a1 is Light's bottom-left corner, h8 Dark's top-right
    assert_eq!(parse_square("a1"), Ok(pos(7, 0)));
    assert_eq!(parse_square("h8"), Ok(pos(0, 7)));
    assert_eq!(square_name(pos(2, 1)), "b6");
}
