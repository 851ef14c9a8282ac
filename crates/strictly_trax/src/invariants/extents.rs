//! Extents invariant: tracked bounds match the occupied cells.

use super::Invariant;
use crate::typestate::GameInProgress;

/// Invariant: the incrementally maintained extents equal the bounding box
/// recomputed from scratch.
pub struct ExtentsInvariant;

impl Invariant<GameInProgress> for ExtentsInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.board.extents() == game.board.recompute_extents()
    }

    fn description() -> &'static str {
        "Tracked extents cover exactly the occupied cells"
    }
}
