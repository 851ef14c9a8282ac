//! Error types for move validation and board queries.

use crate::types::Cell;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
///
/// Every kind is a recoverable validation outcome. Broken internal
/// invariants panic instead of producing one of these.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TraxErrorKind {
    /// Input does not match the move grammar.
    #[display("Malformed move notation: {}", _0)]
    MalformedNotation(String),

    /// Target cell is occupied, isolated, or outside the allowed extent.
    #[display("Illegal placement: {}", _0)]
    IllegalPlacement(String),

    /// Forced play from the placement reaches an unsatisfiable cell.
    #[display("Illegal move: forced play contradicts at {}", _0)]
    IllegalCascade(Cell),

    /// A coordinate conversion was attempted before any tile was placed.
    #[display("Board is empty")]
    EmptyBoard,

    /// The cell lies outside the one-cell frame around the placed tiles.
    #[display("Cell {} has no notation on the current board", _0)]
    OutsideFrame(Cell),

    /// The game has already finished.
    #[display("Game is already over")]
    GameOver,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct TraxError {
    /// Error kind.
    pub kind: TraxErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TraxError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: TraxErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &TraxErrorKind {
        &self.kind
    }
}

impl From<TraxErrorKind> for TraxError {
    #[track_caller]
    fn from(kind: TraxErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
