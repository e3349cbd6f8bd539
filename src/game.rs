//! Turn controller.
//!
//! `Game` owns the board and the side to move and runs every proposed move
//! through the rules: the legality gate for the first move of a turn, the
//! capture chain for follow-up jumps, then the end-of-game check once the
//! turn is complete. A turn including all of its jumps is one unit; the
//! side to move only changes when the chain is finished.

use tracing::{debug, info};

use crate::board::{Board, Move, Position, Side};
use crate::movegen::legal_moves;
use crate::rules::{
    CaptureChain, GameStatus, MoveError, MoveKind, apply_simple, check_move, is_game_over,
};

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The same piece must jump again with one of `options`.
    Continue { options: Vec<Move> },
    /// The turn is over and the other side is to move.
    TurnComplete,
    GameOver { winner: Side },
}

/// One accepted move (or one jump of a chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub side: Side,
    pub mv: Move,
    /// Square of the piece removed, for captures.
    pub captured: Option<Position>,
    /// Ply number (turn count) the move belongs to, starting at 0.
    pub ply: usize,
}

pub struct Game {
    board: Board,
    to_move: Side,
    chain: Option<CaptureChain>,
    history: Vec<HistoryEntry>,
    winner: Option<Side>,
    plies: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard layout with Light to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::Light)
    }

    /// Start from an arbitrary position. If `to_move` has no pieces or no
    /// moves there, the game starts out won by the other side.
    pub fn from_board(board: Board, to_move: Side) -> Self {
        let winner = is_game_over(&board, to_move.opponent()).winner();
        if let Some(winner) = winner {
            info!(%winner, "position is already decided");
        }
        Game {
            board,
            to_move,
            chain: None,
            history: Vec::new(),
            winner,
            plies: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// The unfinished capture chain of the side to move, if any.
    pub fn pending_chain(&self) -> Option<&CaptureChain> {
        self.chain.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Completed turns so far.
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Moves the side to move may play now: the continuation options while
    /// a chain is pending, otherwise the captures if there are any, else the
    /// simple moves. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        match &self.chain {
            Some(chain) => chain.options().to_vec(),
            None => legal_moves(&self.board, self.to_move),
        }
    }

    /// Play one move for the side to move.
    ///
    /// Illegal moves are refused with the board unchanged. A capture that
    /// leaves the piece with further jumps returns `Continue` and keeps the
    /// turn open until the chain is finished.
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        if let Some(winner) = self.winner {
            return Err(MoveError::GameOver { winner });
        }

        if let Some(chain) = self.chain.as_mut() {
            let captured = chain.advance(&mut self.board, mv)?;
            self.record(mv, Some(captured));
            return Ok(self.after_capture());
        }

        match check_move(&self.board, self.to_move, mv)? {
            MoveKind::Simple => {
                if apply_simple(&mut self.board, mv) {
                    debug!(side = %self.to_move, square = %mv.to, "promoted");
                }
                self.record(mv, None);
                Ok(self.finish_turn())
            }
            MoveKind::Capture => {
                let chain = CaptureChain::begin(&mut self.board, self.to_move, mv)?;
                let captured = chain.captured().last().copied();
                self.chain = Some(chain);
                self.record(mv, captured);
                Ok(self.after_capture())
            }
        }
    }

    fn after_capture(&mut self) -> MoveOutcome {
        let pending = self
            .chain
            .as_ref()
            .filter(|chain| !chain.is_complete())
            .map(|chain| chain.options().to_vec());
        if let Some(options) = pending {
            return MoveOutcome::Continue { options };
        }

        if let Some(chain) = self.chain.take() {
            if chain.promoted() {
                debug!(side = %chain.side(), square = %chain.square(), "promoted during capture");
            }
        }
        self.finish_turn()
    }

    fn finish_turn(&mut self) -> MoveOutcome {
        self.plies += 1;
        match is_game_over(&self.board, self.to_move) {
            GameStatus::Won(winner) => {
                info!(%winner, plies = self.plies, "game over");
                self.winner = Some(winner);
                MoveOutcome::GameOver { winner }
            }
            GameStatus::InProgress => {
                self.to_move = self.to_move.opponent();
                MoveOutcome::TurnComplete
            }
        }
    }

    fn record(&mut self, mv: Move, captured: Option<Position>) {
        self.history.push(HistoryEntry {
            side: self.to_move,
            mv,
            captured,
            ply: self.plies,
        });
    }
}
