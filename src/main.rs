//! Draughts-Rust: English draughts in the terminal.
//!
//! ## Usage
//!
//! - `draughts-rust` - Human vs human on one terminal
//! - `draughts-rust play --dark random` - Play Light against the random player
//! - `draughts-rust demo` - Watch two random players
//!
//! Set `RUST_LOG=debug` to see mandatory captures and capture chains logged
//! to stderr.

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use draughts_rust::console::{Console, ConsoleConfig, PlayerKind, Seat};
use draughts_rust::constants::{DARK_NAME, LIGHT_NAME, MAX_PLIES};

/// Draughts-Rust: English draughts with flying kings
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Watch two random players
    Demo {
        /// Seed for the random players
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many plies
        #[arg(long, default_value_t = MAX_PLIES)]
        max_plies: usize,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Who plays Light (moves first)
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    light: PlayerKind,
    /// Who plays Dark
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    dark: PlayerKind,
    /// Display name for Light
    #[arg(long, default_value = LIGHT_NAME)]
    light_name: String,
    /// Display name for Dark
    #[arg(long, default_value = DARK_NAME)]
    dark_name: String,
    /// Seed for the random player
    #[arg(long)]
    seed: Option<u64>,
    /// Turn the board around on Dark's turns
    #[arg(long)]
    rotate: bool,
    /// Abandon the game after this many plies
    #[arg(long, default_value_t = MAX_PLIES)]
    max_plies: usize,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            light: PlayerKind::Human,
            dark: PlayerKind::Human,
            light_name: LIGHT_NAME.to_string(),
            dark_name: DARK_NAME.to_string(),
            seed: None,
            rotate: false,
            max_plies: MAX_PLIES,
        }
    }
}

impl From<PlayArgs> for ConsoleConfig {
    fn from(args: PlayArgs) -> Self {
        ConsoleConfig {
            light: Seat {
                name: args.light_name,
                kind: args.light,
            },
            dark: Seat {
                name: args.dark_name,
                kind: args.dark,
            },
            rotate: args.rotate,
            seed: args.seed,
            max_plies: args.max_plies,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => {
            let mut console = Console::new(args.into());
            console.run(io::stdin().lock(), io::stdout())
        }
        Some(Commands::Demo { seed, max_plies }) => {
            let args = PlayArgs {
                light: PlayerKind::Random,
                dark: PlayerKind::Random,
                seed,
                max_plies,
                ..PlayArgs::default()
            };
            let mut console = Console::new(args.into());
            console.run(io::empty(), io::stdout())
        }
        None => {
            let mut console = Console::new(PlayArgs::default().into());
            console.run(io::stdin().lock(), io::stdout())
        }
    }
}
