//! Terminal front-end.
//!
//! Reads one command per line, much like a text protocol: a move such as
//! `c3-d4` or `c3xe5`, or one of the words listed in [`HELP`]. Each command
//! gets a reply of `(success, message)`. Seats played by the random player
//! move on their own between human commands.
//!
//! ## Example
//!
//! ```ignore
//! use draughts_rust::console::{Console, ConsoleConfig};
//! let mut console = Console::new(ConsoleConfig::default());
//! console.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::ValueEnum;
use tracing::debug;

use crate::ai::RandomPlayer;
use crate::board::{Board, Position, Side};
use crate::constants::{DARK_NAME, EMPTY, LIGHT_NAME, MAX_PLIES, N};
use crate::game::{Game, HistoryEntry, MoveOutcome};
use crate::notation::{format_moves, parse_move};
use crate::rules::MoveError;

pub const HELP: &str = "\
Commands:
  c3-d4      move a piece (use c3xe5 or c3-e5 for a capture)
  moves      list the moves you may play
  board      show the board
  history    show the moves played so far
  help       show this text
  quit       leave the game";

/// Who plays a seat.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Random,
}

#[derive(Clone, Debug)]
pub struct Seat {
    pub name: String,
    pub kind: PlayerKind,
}

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub light: Seat,
    pub dark: Seat,
    /// Show the board from Dark's side on Dark's turns.
    pub rotate: bool,
    /// Seed for the random player; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Abandon the game after this many plies.
    pub max_plies: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            light: Seat {
                name: LIGHT_NAME.to_string(),
                kind: PlayerKind::Human,
            },
            dark: Seat {
                name: DARK_NAME.to_string(),
                kind: PlayerKind::Human,
            },
            rotate: false,
            seed: None,
            max_plies: MAX_PLIES,
        }
    }
}

pub struct Console {
    game: Game,
    config: ConsoleConfig,
    ai: RandomPlayer,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        let ai = match config.seed {
            Some(seed) => RandomPlayer::with_seed(seed),
            None => RandomPlayer::new(),
        };
        Self {
            game: Game::new(),
            config,
            ai,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn seat(&self, side: Side) -> &Seat {
        match side {
            Side::Light => &self.config.light,
            Side::Dark => &self.config.dark,
        }
    }

    fn player_label(&self, side: Side) -> String {
        format!("{} ({side})", self.seat(side).name)
    }

    fn out_of_plies(&self) -> bool {
        self.game.plies() >= self.config.max_plies
    }

    /// Run the game loop until the game ends, `quit` is entered, the input
    /// runs out, or the ply limit is reached.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "Welcome to Draughts!")?;
        writeln!(out, "{} moves first.", self.player_label(Side::Light))?;
        writeln!(out, "Enter moves like c3-d4. Type 'help' for commands.\n")?;

        let mut lines = input.lines();
        loop {
            self.play_random_turns(&mut out)?;

            if let Some(winner) = self.game.winner() {
                write!(out, "{}", self.render())?;
                writeln!(out, "Congratulations, {}! You are the winner!", self.player_label(winner))?;
                writeln!(out, "Game over. Thank you for playing!")?;
                break;
            }
            if self.out_of_plies() {
                writeln!(out, "Game stopped after {} plies.", self.game.plies())?;
                break;
            }

            write!(out, "{}", self.render())?;
            writeln!(out, "{}", self.prompt())?;
            out.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (success, message) = self.execute(line);
            let prefix = if success { "" } else { "! " };
            writeln!(out, "{prefix}{message}\n")?;

            if is_quit(line) {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Let the random player move while it holds the side to move.
    fn play_random_turns<W: Write>(&mut self, out: &mut W) -> Result<()> {
        while !self.game.is_over()
            && !self.out_of_plies()
            && self.seat(self.game.to_move()).kind == PlayerKind::Random
        {
            let side = self.game.to_move();
            let played = self.ai.play_turn(&mut self.game)?;
            if played.is_empty() {
                break;
            }
            debug!(%side, moves = %format_moves(&played), "random player moved");
            writeln!(out, "{} played {}", self.player_label(side), format_moves(&played))?;
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        let side = self.game.to_move();
        match self.game.pending_chain() {
            Some(chain) => format!(
                "{}, keep jumping with the piece on {}: {}",
                self.player_label(side),
                chain.square(),
                format_moves(chain.options())
            ),
            None => format!("{}, it's your turn.", self.player_label(side)),
        }
    }

    fn render(&self) -> String {
        let rotated = self.config.rotate && self.game.to_move() == Side::Dark;
        render(self.game.board(), rotated)
    }

    /// Execute one command line and return `(success, reply)`.
    pub fn execute(&mut self, line: &str) -> (bool, String) {
        let command = line.trim().to_lowercase();
        match command.as_str() {
            "help" => (true, HELP.to_string()),
            "board" => (true, self.render()),
            "moves" => {
                let moves = self.game.legal_moves();
                if moves.is_empty() {
                    (true, "No legal moves.".to_string())
                } else {
                    (true, format_moves(&moves))
                }
            }
            "history" => (true, history_text(self.game.history())),
            "quit" | "exit" => (true, "Bye.".to_string()),
            _ => self.execute_move(&command),
        }
    }

    fn execute_move(&mut self, text: &str) -> (bool, String) {
        let mv = match parse_move(text) {
            Ok(mv) => mv,
            Err(e) => return (false, format!("{e}. Type 'help' for commands.")),
        };
        let side = self.game.to_move();

        let mut played = vec![mv];
        let mut outcome = match self.game.play(mv) {
            Ok(outcome) => outcome,
            Err(MoveError::CaptureRequired { options, .. }) => {
                return (
                    false,
                    format!(
                        "You have a mandatory capture. Please make a capturing move: {}",
                        format_moves(&options)
                    ),
                );
            }
            Err(MoveError::IllegalMove(_)) => {
                return (
                    false,
                    "Invalid move. Please follow the rules of draughts and try again.".to_string(),
                );
            }
            Err(e) => return (false, e.to_string()),
        };

        // A single forced continuation is played without asking.
        while let MoveOutcome::Continue { options } = &outcome {
            let [next] = options.as_slice() else {
                break;
            };
            let next = *next;
            match self.game.play(next) {
                Ok(o) => {
                    played.push(next);
                    outcome = o;
                }
                Err(e) => return (false, e.to_string()),
            }
        }

        let summary = format!("{} played {}", self.player_label(side), format_moves(&played));
        let message = match outcome {
            MoveOutcome::Continue { options } => {
                format!("{summary}. Jump again: {}", format_moves(&options))
            }
            MoveOutcome::TurnComplete => summary,
            MoveOutcome::GameOver { winner } => {
                format!("{summary}. {} wins.", self.player_label(winner))
            }
        };
        (true, message)
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "quit" | "exit")
}

/// Per-side move history, captures written with `x`.
fn history_text(history: &[HistoryEntry]) -> String {
    let mut lines = vec!["Move history:".to_string()];
    for side in [Side::Light, Side::Dark] {
        let moves: Vec<String> = history
            .iter()
            .filter(|e| e.side == side)
            .map(|e| {
                let sep = if e.captured.is_some() { 'x' } else { '-' };
                format!("{}{sep}{}", e.mv.from, e.mv.to)
            })
            .collect();
        lines.push(format!("{side} moves: {}", moves.join(", ")));
    }
    lines.join("\n")
}

/// Draw the board with file letters and rank digits around it.
///
/// `rotated` turns the picture 180 degrees so Dark sees its pieces at the
/// bottom. Only the picture changes; square names stay the same.
pub fn render(board: &Board, rotated: bool) -> String {
    let order: Vec<usize> = if rotated {
        (0..N).rev().collect()
    } else {
        (0..N).collect()
    };

    let files: String = order
        .iter()
        .map(|&col| format!(" {}", (b'a' + col as u8) as char))
        .collect();
    let files = format!(" {files}\n");

    let mut text = files.clone();
    for &row in &order {
        let rank = N - row;
        let squares: String = order
            .iter()
            .map(|&col| {
                let ch = board
                    .get(Position::new(row, col))
                    .map_or(EMPTY, |piece| piece.symbol());
                format!(" {ch}")
            })
            .collect();
        text.push_str(&format!("{rank}{squares} {rank}\n"));
    }
    text.push_str(&files);
    text
}
