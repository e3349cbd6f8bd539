//! Draughts-Rust: a rules engine for English draughts.
//!
//! The engine decides which moves are legal on an 8x8 board, enforces the
//! mandatory capture rule, resolves multi-jump capture chains (including
//! promotion in the middle of a chain), and detects the end of the game.
//! Kings are "flying": they slide and capture along whole diagonals.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, diagram characters, front-end defaults
//! - [`board`] - Sides, pieces, squares, moves, and the board itself
//! - [`notation`] - `c3-d4` style square and move notation
//! - [`movegen`] - Simple move and capture generation
//! - [`rules`] - Legality, captures, promotion, end of game
//! - [`game`] - Turn controller that owns the board
//! - [`ai`] - Uniform random player
//! - [`console`] - Terminal front-end
//!
//! ## Example
//!
//! ```
//! use draughts_rust::game::{Game, MoveOutcome};
//! use draughts_rust::notation::parse_move;
//!
//! let mut game = Game::new();
//! let outcome = game.play(parse_move("c3-d4").unwrap()).unwrap();
//! assert_eq!(outcome, MoveOutcome::TurnComplete);
//! println!("{}", game.board());
//! ```

pub mod ai;
pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod rules;
