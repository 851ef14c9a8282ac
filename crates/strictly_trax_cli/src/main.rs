//! Strictly Trax - command-line front end
//!
//! Replays a move list through the engine and reports the result as JSON.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use serde::Serialize;
use strictly_trax::{
    GameConfig, GameInProgress, GameResult, HistoryEntry, Move, Outcome, Placement, Player, Tile,
    Win,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::Legal(args) => run_legal(args),
    }
}

/// Where the replayed game stands.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Status<'a> {
    InProgress { to_move: Player },
    Finished { outcome: Outcome, wins: &'a [Win] },
}

/// Final position of a replayed game.
#[derive(Debug, Serialize)]
struct ReplayReport<'a> {
    config: GameConfig,
    render: String,
    placements: &'a [Placement],
    history: &'a [HistoryEntry],
    #[serde(flatten)]
    status: Status<'a>,
}

/// One legal move from the current position.
#[derive(Debug, Serialize)]
struct LegalEntry<'a> {
    notation: String,
    #[serde(rename = "move")]
    mv: Move,
    tile: Tile,
    forced: &'a [Placement],
}

/// Resolves the rule configuration from a file or a preset.
#[instrument(skip(args))]
fn load_config(args: &GameArgs) -> Result<GameConfig> {
    match &args.config {
        Some(path) => Ok(GameConfig::from_file(path)?),
        None => Ok(GameConfig::from(args.variant)),
    }
}

/// Collects moves from the move file or the command line.
#[instrument(skip(args))]
fn load_moves(args: &GameArgs) -> Result<Vec<String>> {
    let Some(path) = &args.file else {
        return Ok(args.moves.clone());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read move file {}", path.display()))?;
    let moves: Vec<String> = content.split_whitespace().map(str::to_string).collect();
    debug!(count = moves.len(), "Loaded moves from file");
    Ok(moves)
}

fn replay(args: &GameArgs) -> Result<(GameConfig, GameResult)> {
    let config = load_config(args)?;
    let moves = load_moves(args)?;
    info!(count = moves.len(), max_extent = ?config.max_extent(), "Replaying game");
    let result = GameInProgress::replay_notation(config, &moves)?;
    Ok((config, result))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

/// Replay a game and print the final position
fn run_replay(args: GameArgs) -> Result<()> {
    let (config, result) = replay(&args)?;
    let status = match &result {
        GameResult::InProgress(game) => Status::InProgress {
            to_move: game.to_move(),
        },
        GameResult::Finished(game) => Status::Finished {
            outcome: *game.outcome(),
            wins: game.wins(),
        },
    };
    let report = ReplayReport {
        config,
        render: result.board().render(),
        placements: result.board().placements(),
        history: result.history(),
        status,
    };
    print_json(&report, args.pretty)
}

/// Replay a game and print every legal move from the final position
fn run_legal(args: GameArgs) -> Result<()> {
    let (_, result) = replay(&args)?;
    let game = match result {
        GameResult::InProgress(game) => game,
        GameResult::Finished(game) => bail!("Game is already over: {}", game.outcome()),
    };
    let moves = game.legal_moves();
    let entries = moves
        .iter()
        .map(|legal| {
            Ok(LegalEntry {
                notation: legal.mv().to_notation(game.board())?,
                mv: legal.mv(),
                tile: legal.tile(),
                forced: legal.forced(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!(count = entries.len(), "Listed legal moves");
    print_json(&entries, args.pretty)
}
