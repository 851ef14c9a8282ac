//! Monotonic board invariant: tiles never change once set.

use super::Invariant;
use crate::typestate::GameInProgress;

/// Invariant: the board is exactly the starting board plus every tile the
/// move history wrote, each into a cell that was empty at the time.
pub struct MonotonicBoardInvariant;

impl Invariant<GameInProgress> for MonotonicBoardInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = game.base.clone();

        for entry in &game.history {
            for placement in entry.placements() {
                if reconstructed.has(placement.cell) {
                    return false;
                }
                reconstructed.set(placement.cell, placement.tile);
            }
        }

        reconstructed == game.board
    }

    fn description() -> &'static str {
        "Board tiles are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameConfig, GameSetup, Move, Piece, Tile};

    #[test]
    fn test_empty_game_holds() {
        let game = GameSetup::new(GameConfig::standard()).start();
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_single_move_holds() {
        let game = GameSetup::new(GameConfig::standard()).start();
        let game = game
            .play(Move::opening(Piece::Straight))
            .unwrap()
            .into_in_progress()
            .unwrap();
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_untracked_tile_violates() {
        let game = GameSetup::new(GameConfig::standard()).start();
        let mut game = game
            .play(Move::opening(Piece::Straight))
            .unwrap()
            .into_in_progress()
            .unwrap();
        game.board.set(Cell::new(0, 1), Tile::A);
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
