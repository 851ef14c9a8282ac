//! Edge consistency: a shared boundary belongs to one player.

use super::Invariant;
use crate::typestate::GameInProgress;
use crate::types::Direction;

/// Invariant: wherever two tiles touch, both carry the same player's line
/// across the shared edge.
pub struct EdgeConsistencyInvariant;

impl Invariant<GameInProgress> for EdgeConsistencyInvariant {
    fn holds(game: &GameInProgress) -> bool {
        // East and south cover every shared boundary once.
        game.board.iter().all(|(cell, _)| {
            game.board.boundary_agrees(cell, Direction::East)
                && game.board.boundary_agrees(cell, Direction::South)
        })
    }

    fn description() -> &'static str {
        "Adjacent tiles agree on the colour of their shared edge"
    }
}
