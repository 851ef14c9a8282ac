//! Strictly Trax - rule engine for the tile game Trax
//!
//! Two players take turns dropping square tiles on an unbounded grid. Every
//! tile carries one white and one red line, and lines must match across
//! every shared edge. A placement can force further tiles into neighbouring
//! cells; the engine plays those out before the move is accepted.
//!
//! # Architecture
//!
//! - **Board**: sparse growable grid with three coordinate spaces
//! - **Neighbours**: edge colours, forced tiles and piece resolution
//! - **Cascade**: forced-play solver with contradiction detection
//! - **Movegen**: legal moves and move validation
//! - **Connectivity**: per-player line graphs, loops and connections
//! - **Typestate**: setup, in-progress and finished game phases
//!
//! # Example
//!
//! ```
//! use strictly_trax::{GameConfig, GameResult, GameSetup};
//!
//! # fn example() -> Result<(), strictly_trax::TraxError> {
//! let game = GameSetup::new(GameConfig::standard()).start();
//! let GameResult::InProgress(game) = game.play_notation("@0+")? else {
//!     unreachable!("one tile cannot win");
//! };
//! assert_eq!(game.legal_moves().len(), 12);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod cascade;
mod config;
mod connectivity;
mod contracts;
mod error;
mod invariants;
mod movegen;
mod neighbours;
mod notation;
mod phases;
mod types;
mod typestate;

// Crate-level exports - Core types
pub use types::{Cell, Direction, Piece, Placement, Player, Tile};

// Crate-level exports - Errors
pub use error::{ConfigError, TraxError, TraxErrorKind};

// Crate-level exports - Configuration
pub use config::{BOUNDED_EXTENT, GameConfig, Variant};

// Crate-level exports - Board and notation
pub use board::{Board, Extents};
pub use notation::{NotationCell, ParsedMove, column_label, parse_column, parse_move};

// Crate-level exports - Rules
pub use cascade::{Cascade, preview, solve};
pub use neighbours::{
    Neighbourhood, faces_white, facing, forced_tile, incoming, placeable_orientations, resolve,
};

// Crate-level exports - Moves
pub use action::{HistoryEntry, Move};
pub use movegen::{
    LegalMove, OPENING_PIECES, candidate_cells, has_any_legal_move, legal_moves, validate,
};

// Crate-level exports - Win detection
pub use connectivity::{
    Axis, MIN_CONNECTION_SPAN, PlayerGraph, Win, WinKind, connection_wins, evaluate, loop_wins,
};

// Crate-level exports - Game phases
pub use phases::Outcome;
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};

// Crate-level exports - Verification
pub use contracts::{CascadeReproduces, Contract, MoveContract};
pub use invariants::{
    EdgeConsistencyInvariant, ExtentsInvariant, Invariant, InvariantSet, InvariantViolation,
    MonotonicBoardInvariant, SettledInvariant, TraxInvariants,
};
