//! Random player.
//!
//! Picks uniformly among the moves the rules allow: the captures when any
//! exist, otherwise the simple moves. During a capture chain it picks
//! uniformly among the continuation options. With a fixed seed the choices
//! are reproducible.

use fastrand::Rng;

use crate::board::{Board, Move, Side};
use crate::game::{Game, MoveOutcome};
use crate::movegen::legal_moves;
use crate::rules::MoveError;

pub struct RandomPlayer {
    rng: Rng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Pick a move for `side`, or `None` if it has no legal move.
    pub fn choose(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.pick(&legal_moves(board, side))
    }

    /// Pick one of `options` uniformly.
    pub fn pick(&mut self, options: &[Move]) -> Option<Move> {
        if options.is_empty() {
            return None;
        }
        Some(options[self.rng.usize(..options.len())])
    }

    /// Play a whole turn for the side to move in `game`, including every
    /// follow-up jump. Returns the moves played in order; empty if the side
    /// had nothing to play.
    pub fn play_turn(&mut self, game: &mut Game) -> Result<Vec<Move>, MoveError> {
        let mut played = Vec::new();
        while let Some(mv) = self.pick(&game.legal_moves()) {
            let outcome = game.play(mv)?;
            played.push(mv);
            if !matches!(outcome, MoveOutcome::Continue { .. }) {
                break;
            }
        }
        Ok(played)
    }
}
