//! First-class invariants for Trax.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
///
/// Invariants express system guarantees that should never be violated.
/// They are checked in debug builds and can be tested independently.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples of two to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        tracing::warn!(invariant = I::description(), "Invariant violated");
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        check::<S, I4>(state, &mut violations);
        finish(violations)
    }
}

pub mod edge_consistency;
pub mod extents;
pub mod monotonic_board;
pub mod settled;

pub use edge_consistency::EdgeConsistencyInvariant;
pub use extents::ExtentsInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use settled::SettledInvariant;

/// All Trax invariants as a composable set.
pub type TraxInvariants = (
    MonotonicBoardInvariant,
    EdgeConsistencyInvariant,
    ExtentsInvariant,
    SettledInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameConfig, GameInProgress, GameSetup, Tile};

    fn three_moves() -> GameInProgress {
        GameInProgress::replay_notation(GameConfig::standard(), &["@0+", "a0/", "b2\\"])
            .unwrap()
            .into_in_progress()
            .unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let game = GameSetup::new(GameConfig::standard()).start();
        assert!(TraxInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        assert!(TraxInvariants::check_all(&three_moves()).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = three_moves();
        // A tile no move ever wrote, with a White edge against a Red one.
        game.board.set(Cell::new(-1, 0), Tile::B);

        let violations = TraxInvariants::check_all(&game).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MonotonicBoardInvariant, ExtentsInvariant);
        let game = GameSetup::new(GameConfig::standard()).start();
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
