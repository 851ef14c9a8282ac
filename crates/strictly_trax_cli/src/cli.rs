//! Command-line interface for strictly_trax.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_trax::Variant;

/// Strictly Trax - replay and inspect Trax games
#[derive(Parser, Debug)]
#[command(name = "strictly_trax")]
#[command(about = "Replay Trax games and list legal moves", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a game and print the final position
    Replay(GameArgs),

    /// Replay a game and print every legal move from the final position
    Legal(GameArgs),
}

/// Game selection shared by every command
#[derive(Args, Debug)]
pub struct GameArgs {
    /// Rule preset (trax, trax-8x8, loop-trax)
    #[arg(long, default_value = "trax", conflicts_with = "config")]
    pub variant: Variant,

    /// TOML rule configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read moves from a file, separated by whitespace
    #[arg(short, long, conflicts_with = "moves")]
    pub file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Moves in notation, e.g. @0+ a0/ b2\
    pub moves: Vec<String>,
}
