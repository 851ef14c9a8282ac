//! Contract-based validation for Trax.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::Move;
use crate::cascade::{Cascade, preview};
use crate::error::{TraxError, TraxErrorKind};
use crate::invariants::{InvariantSet, TraxInvariants};
use crate::movegen::{LegalMove, validate};
use crate::typestate::GameInProgress;
use crate::types::Placement;
use std::collections::HashSet;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action,
///   and yields the checked form of the action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Proof that the precondition held.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, TraxError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TraxError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: the tiles the last move wrote are exactly what a fresh
/// cascade on the previous board produces.
pub struct CascadeReproduces;

impl CascadeReproduces {
    /// Re-runs the last move's cascade on `before` and compares.
    #[instrument(skip(before, after))]
    pub fn check(before: &GameInProgress, after: &GameInProgress) -> Result<(), TraxError> {
        let Some(entry) = after.history().last() else {
            return Ok(());
        };
        let written: HashSet<Placement> = entry.forced.iter().copied().collect();
        let replayed = match preview(before.board(), Placement::new(entry.mv.cell, entry.tile)) {
            Cascade::Forced(fills) => fills.into_iter().collect::<HashSet<_>>(),
            Cascade::Contradiction { cell } => {
                warn!(%cell, "Committed move contradicts on replay");
                return Err(TraxErrorKind::InvariantViolation(format!(
                    "committed move contradicts at {cell}"
                ))
                .into());
            }
        };
        if replayed != written {
            warn!(
                written = written.len(),
                replayed = replayed.len(),
                "Forced tiles differ on replay"
            );
            return Err(TraxErrorKind::InvariantViolation(
                "forced tiles differ from a fresh cascade".to_string(),
            )
            .into());
        }
        let grown = before.board().len() + 1 + written.len();
        if after.board().len() != grown {
            return Err(TraxErrorKind::InvariantViolation(format!(
                "board holds {} tiles, expected {grown}",
                after.board().len()
            ))
            .into());
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Cell is empty, touches the board and fits the configured extent
/// - Piece resolves to a tile there
/// - Forced play settles without contradiction
///
/// Postconditions:
/// - Forced tiles match a fresh cascade
/// - Board remains monotonic, edge-consistent and settled
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    type Checked = LegalMove;

    fn pre(game: &GameInProgress, action: &Move) -> Result<LegalMove, TraxError> {
        validate(game.board(), *action, game.config())
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), TraxError> {
        CascadeReproduces::check(before, after)?;
        TraxInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            TraxError::new(TraxErrorKind::InvariantViolation(format!(
                "Postcondition failed: {}",
                descriptions
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameConfig, GameResult, GameSetup, Piece, Tile};

    fn opened() -> GameInProgress {
        GameSetup::new(GameConfig::standard())
            .start()
            .play(Move::opening(Piece::Straight))
            .unwrap()
            .into_in_progress()
            .unwrap()
    }

    #[test]
    fn test_precondition_empty_cell() {
        let game = opened();
        let action = Move::new(Cell::new(0, 1), Piece::Slash);
        let legal = MoveContract::pre(&game, &action).unwrap();
        assert_eq!(legal.tile(), Tile::C);
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let game = opened();
        let action = Move::new(Cell::ORIGIN, Piece::Slash);
        assert!(matches!(
            MoveContract::pre(&game, &action).unwrap_err().kind(),
            TraxErrorKind::IllegalPlacement(_)
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let game = opened();
        let action = Move::new(Cell::new(1, 0), Piece::Backslash);
        if let Ok(GameResult::InProgress(after)) = game.play(action) {
            assert!(MoveContract::post(&game, &after).is_ok());
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let game = opened();
        let action = Move::new(Cell::new(1, 0), Piece::Backslash);
        if let Ok(GameResult::InProgress(mut after)) = game.play(action) {
            after.board.set(Cell::new(-1, 0), Tile::B);
            assert!(MoveContract::post(&game, &after).is_err());
        } else {
            panic!("Expected in-progress game");
        }
    }
}
