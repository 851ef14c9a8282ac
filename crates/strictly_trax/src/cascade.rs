//! Forced play.
//!
//! When two lines of the same player enter an empty cell, only one tile can
//! continue them, and that tile must be placed. Each forced tile can force
//! its own neighbours in turn. A cell reached by three lines of one player
//! has no valid tile, which makes the originating move illegal.
//!
//! Propagation runs over an explicit work queue. The final set of forced
//! tiles does not depend on visiting order because each forced value is a
//! function of neighbours that never change once set.

use crate::board::Board;
use crate::neighbours::{forced_tile, incoming};
use crate::types::{Cell, Direction, Placement, Player};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Outcome of propagating one placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cascade {
    /// Every tile forced by the placement, in the order they were written.
    Forced(Vec<Placement>),
    /// Propagation reached a cell that no tile can satisfy.
    Contradiction {
        /// The first unsatisfiable cell found.
        cell: Cell,
    },
}

impl Cascade {
    /// Checks if the cascade is free of contradiction.
    pub fn is_legal(&self) -> bool {
        matches!(self, Cascade::Forced(_))
    }

    /// Forced tiles of a legal cascade.
    pub fn forced(&self) -> Option<&[Placement]> {
        match self {
            Cascade::Forced(fills) => Some(fills),
            Cascade::Contradiction { .. } => None,
        }
    }
}

/// What a cell's incoming lines demand.
enum Demand {
    /// Not enough lines of one player to decide anything.
    Free,
    /// Two lines of one player: the cell must hold the joining tile.
    Forced(Player, Direction, Direction),
    /// Three or more lines of one player.
    Impossible,
}

fn demand(board: &Board, cell: Cell) -> Demand {
    let lines = incoming(&board.neighbourhood(cell));
    let mut by_player: [Vec<Direction>; 2] = [Vec::new(), Vec::new()];
    for dir in Direction::ALL {
        match lines[dir.index()] {
            Some(Player::White) => by_player[0].push(dir),
            Some(Player::Red) => by_player[1].push(dir),
            None => {}
        }
    }

    if by_player.iter().any(|dirs| dirs.len() > 2) {
        return Demand::Impossible;
    }
    for (player, dirs) in Player::ALL.into_iter().zip(&by_player) {
        if let [d1, d2] = dirs.as_slice() {
            return Demand::Forced(player, *d1, *d2);
        }
    }
    Demand::Free
}

/// Propagates forced play outward from a tile just written at `trigger`.
///
/// Forced tiles are written into `board` as they are found. On
/// contradiction the board holds a partial cascade and must be discarded;
/// run this on a scratch copy, as [`preview`] does.
///
/// A cell outside the extents touches at most one tile, so forced tiles
/// never grow the extents set by the trigger.
#[instrument(skip(board), fields(tiles = board.len()))]
pub fn solve(board: &mut Board, trigger: Cell) -> Cascade {
    let mut queue: VecDeque<Cell> = board.empty_neighbours(trigger).collect();
    let mut fills = Vec::new();

    while let Some(cell) = queue.pop_front() {
        if board.has(cell) {
            continue;
        }
        match demand(board, cell) {
            Demand::Free => {}
            Demand::Impossible => {
                debug!(%cell, "Three lines of one player meet");
                return Cascade::Contradiction { cell };
            }
            Demand::Forced(player, d1, d2) => {
                let tile = forced_tile(player, d1, d2);
                board.set(cell, tile);
                fills.push(Placement::new(cell, tile));
                queue.extend(board.empty_neighbours(cell));
            }
        }
    }

    debug!(forced = fills.len(), "Cascade settled");
    Cascade::Forced(fills)
}

/// Runs a placement and its cascade on a copy of `board`.
///
/// The live board is never touched.
#[instrument(skip(board), fields(cell = %placement.cell, tile = %placement.tile))]
pub fn preview(board: &Board, placement: Placement) -> Cascade {
    let mut scratch = board.clone();
    scratch.set(placement.cell, placement.tile);
    solve(&mut scratch, placement.cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;
    use std::collections::HashSet;

    #[test]
    fn test_north_and_south_force_straight() {
        let mut board = Board::new();
        board.set(Cell::new(0, 0), Tile::A);
        let cascade = preview(&board, Placement::new(Cell::new(0, 2), Tile::A));
        assert_eq!(
            cascade,
            Cascade::Forced(vec![Placement::new(Cell::new(0, 1), Tile::A)])
        );
    }

    #[test]
    fn test_mixed_colours_do_not_force() {
        let mut board = Board::new();
        board.set(Cell::new(0, 0), Tile::A);
        // Tile B presents Red on its north edge.
        let cascade = preview(&board, Placement::new(Cell::new(0, 2), Tile::B));
        assert_eq!(cascade, Cascade::Forced(Vec::new()));
    }

    #[test]
    fn test_chain_reaction() {
        // (0,1) is forced White north-south, which sends Red east into (1,1)
        // where it meets Red from (2,1).
        let mut board = Board::new();
        board.set(Cell::new(0, 0), Tile::A);
        board.set(Cell::new(2, 1), Tile::A);
        let cascade = preview(&board, Placement::new(Cell::new(0, 2), Tile::A));
        let fills: HashSet<Placement> = cascade.forced().unwrap().iter().copied().collect();
        let expected: HashSet<Placement> = [
            Placement::new(Cell::new(0, 1), Tile::A),
            Placement::new(Cell::new(1, 1), Tile::A),
        ]
        .into_iter()
        .collect();
        assert_eq!(fills, expected);
    }

    #[test]
    fn test_contradiction_leaves_live_board_untouched() {
        let mut board = Board::new();
        // Three White lines aimed at (0,0) once both (1,0) and (0,1) fill.
        board.set(Cell::new(0, -1), Tile::A);
        board.set(Cell::new(2, 0), Tile::A);
        board.set(Cell::new(2, 1), Tile::C);
        board.set(Cell::new(-1, 1), Tile::A);
        let before = board.clone();
        let cascade = preview(&board, Placement::new(Cell::new(1, 1), Tile::D));
        assert_eq!(cascade, Cascade::Contradiction { cell: Cell::new(0, 0) });
        assert_eq!(board, before);
    }
}
