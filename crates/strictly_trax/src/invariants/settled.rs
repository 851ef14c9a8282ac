//! Settled invariant: no forced play is left pending.

use super::Invariant;
use crate::typestate::GameInProgress;

/// Invariant: no empty cell has two lines of the same player entering it.
///
/// Such a cell would have been filled by forced play.
pub struct SettledInvariant;

impl Invariant<GameInProgress> for SettledInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.board
            .frontier()
            .into_iter()
            .all(|cell| !game.board.is_pending(cell))
    }

    fn description() -> &'static str {
        "No empty cell is left with a pending forced tile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Cell, GameConfig, GameInProgress, Player, Tile};

    #[test]
    fn test_pending_cell_violates() {
        let mut board = Board::new();
        board.set(Cell::new(0, 0), Tile::A);
        board.set(Cell::new(1, 1), Tile::B);
        // (1,0) gets Red from the west and Red from the south.
        let game = GameInProgress::from_board(board, Player::White, GameConfig::standard());
        assert!(!SettledInvariant::holds(&game));
    }
}
