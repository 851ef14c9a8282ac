//! First-class action types for Trax.
//!
//! Moves are domain events, not side effects. They represent the player's
//! intent and can be validated against a board before anything is written.

use crate::board::Board;
use crate::error::{TraxError, TraxErrorKind};
use crate::notation::{NotationCell, ParsedMove, parse_move};
use crate::types::{Cell, Piece, Placement, Tile};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a piece dropped on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Target cell in absolute coordinates.
    pub cell: Cell,
    /// Chosen orientation.
    pub piece: Piece,
}

impl Move {
    /// Creates a new move.
    pub fn new(cell: Cell, piece: Piece) -> Self {
        Self { cell, piece }
    }

    /// Creates the opening move, which always lands on the origin.
    pub fn opening(piece: Piece) -> Self {
        Self::new(Cell::ORIGIN, piece)
    }

    /// Resolves a parsed notation move against the board it will be played on.
    ///
    /// # Errors
    ///
    /// Returns `MalformedNotation` when the cell reference is missing after
    /// the first move, or names anything but `@0` on the first move.
    #[instrument(skip(board))]
    pub fn from_parsed(parsed: ParsedMove, board: &Board) -> Result<Self, TraxError> {
        if board.is_empty() {
            return match parsed.cell {
                None | Some(NotationCell::ORIGIN) => Ok(Self::opening(parsed.piece)),
                Some(other) => Err(TraxErrorKind::MalformedNotation(format!(
                    "first move must be played at @0, not {other}"
                ))
                .into()),
            };
        }
        let Some(at) = parsed.cell else {
            return Err(TraxErrorKind::MalformedNotation(format!(
                "'{parsed}' needs a cell reference after the first move"
            ))
            .into());
        };
        Ok(Self::new(board.from_notation(at)?, parsed.piece))
    }

    /// Parses a notation string against the board it will be played on.
    ///
    /// # Errors
    ///
    /// Returns `MalformedNotation` for input outside the move grammar.
    pub fn parse(input: &str, board: &Board) -> Result<Self, TraxError> {
        Self::from_parsed(parse_move(input)?, board)
    }

    /// Formats the move as notation relative to the board before the move.
    ///
    /// # Errors
    ///
    /// Returns `OutsideFrame` if the cell has no notation on `board`.
    pub fn to_notation(&self, board: &Board) -> Result<String, TraxError> {
        if board.is_empty() {
            return Ok(format!("{}{}", NotationCell::ORIGIN, self.piece));
        }
        Ok(format!("{}{}", board.to_notation(self.cell)?, self.piece))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.piece, self.cell)
    }
}

/// One committed move together with everything it wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The move as chosen.
    pub mv: Move,
    /// Notation of the move on the board it was played on.
    pub notation: String,
    /// Tile the piece resolved to.
    pub tile: Tile,
    /// Tiles forced by the move, in the order they were written.
    pub forced: Vec<Placement>,
}

impl HistoryEntry {
    /// All placements written by this move, chosen tile first.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        std::iter::once(Placement::new(self.mv.cell, self.tile)).chain(self.forced.iter().copied())
    }
}
