//! Tile geometry: which line crosses which edge, and which tile a cell is
//! forced to hold.
//!
//! These are pure functions of the tiles passed in. Nothing here looks at a
//! board.

use crate::types::{Direction, Piece, Player, Tile};
use tracing::instrument;

/// Tiles around one cell, indexed like [`Direction::ALL`].
pub type Neighbourhood = [Option<Tile>; 4];

/// Whether the tile routes White's line through the given edge.
pub fn faces_white(direction: Direction, tile: Tile) -> bool {
    use Tile::*;
    match direction {
        Direction::North => matches!(tile, A | C | E),
        Direction::East => matches!(tile, B | D | E),
        Direction::South => matches!(tile, A | D | F),
        Direction::West => matches!(tile, B | C | F),
    }
}

/// The player whose line crosses the given edge of the tile.
pub fn facing(direction: Direction, tile: Tile) -> Player {
    if faces_white(direction, tile) {
        Player::White
    } else {
        Player::Red
    }
}

/// The tile that carries `player`'s line through edges `d1` and `d2`.
///
/// # Panics
///
/// Panics when `d1 == d2`; no tile routes a line in and out one edge.
#[instrument]
pub fn forced_tile(player: Player, d1: Direction, d2: Direction) -> Tile {
    use Direction::*;
    let pair = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
    match (player, pair) {
        (Player::White, (North, South)) => Tile::A,
        (Player::White, (East, West)) => Tile::B,
        (Player::White, (North, West)) => Tile::C,
        (Player::White, (East, South)) => Tile::D,
        (Player::White, (North, East)) => Tile::E,
        (Player::White, (South, West)) => Tile::F,
        (Player::Red, (East, West)) => Tile::A,
        (Player::Red, (North, South)) => Tile::B,
        (Player::Red, (East, South)) => Tile::C,
        (Player::Red, (North, West)) => Tile::D,
        (Player::Red, (South, West)) => Tile::E,
        (Player::Red, (North, East)) => Tile::F,
        _ => panic!("no tile routes {player} through {d1} and {d2}"),
    }
}

/// Which player's line enters the centre cell through each edge.
pub fn incoming(neighbours: &Neighbourhood) -> [Option<Player>; 4] {
    Direction::ALL.map(|dir| {
        neighbours[dir.index()].map(|tile| facing(dir.opposite(), tile))
    })
}

/// Orientations a player may choose for an empty cell.
///
/// One neighbour admits every piece. Two neighbours admit exactly two
/// pieces, decided by where the neighbours sit. Any other count is not a
/// placeable cell.
#[instrument]
pub fn placeable_orientations(neighbours: &Neighbourhood) -> Vec<Piece> {
    let occupied: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|dir| neighbours[dir.index()].is_some())
        .collect();

    match occupied.as_slice() {
        [_] => Piece::ALL.to_vec(),
        [a, b] if a.opposite() == *b => vec![Piece::Slash, Piece::Backslash],
        [Direction::North, Direction::East] | [Direction::South, Direction::West] => {
            vec![Piece::Straight, Piece::Slash]
        }
        [Direction::North, Direction::West] | [Direction::East, Direction::South] => {
            vec![Piece::Straight, Piece::Backslash]
        }
        _ => Vec::new(),
    }
}

/// Resolves a piece to the tile whose edges agree with every incoming line.
#[instrument]
pub fn resolve(piece: Piece, neighbours: &Neighbourhood) -> Option<Tile> {
    let lines = incoming(neighbours);
    piece.tiles().into_iter().find(|tile| {
        Direction::ALL.into_iter().all(|dir| match lines[dir.index()] {
            Some(player) => facing(dir, *tile) == player,
            None => true,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn around(entries: &[(Direction, Tile)]) -> Neighbourhood {
        let mut out = [None; 4];
        for (dir, tile) in entries {
            out[dir.index()] = Some(*tile);
        }
        out
    }

    #[test]
    fn test_each_edge_faces_white_on_three_tiles() {
        for dir in Direction::ALL {
            let count = Tile::iter().filter(|t| faces_white(dir, *t)).count();
            assert_eq!(count, 3, "{dir}");
        }
    }

    #[test]
    fn test_forced_tile_routes_player_through_both_edges() {
        for player in Player::ALL {
            for (i, d1) in Direction::ALL.into_iter().enumerate() {
                for d2 in Direction::ALL.into_iter().skip(i + 1) {
                    let tile = forced_tile(player, d1, d2);
                    assert_eq!(facing(d1, tile), player);
                    assert_eq!(facing(d2, tile), player);
                    assert_eq!(forced_tile(player, d2, d1), tile);
                }
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_forced_tile_rejects_single_edge() {
        forced_tile(Player::White, Direction::East, Direction::East);
    }

    #[test]
    fn test_incoming_reads_the_far_edge() {
        // A tile west of the cell presents its east edge.
        let n = around(&[(Direction::West, Tile::B)]);
        assert_eq!(incoming(&n)[Direction::West.index()], Some(Player::White));
        let n = around(&[(Direction::West, Tile::A)]);
        assert_eq!(incoming(&n)[Direction::West.index()], Some(Player::Red));
    }

    #[test]
    fn test_one_neighbour_allows_all_pieces() {
        let n = around(&[(Direction::North, Tile::A)]);
        assert_eq!(placeable_orientations(&n), Piece::ALL.to_vec());
    }

    #[test]
    fn test_two_neighbours_allow_two_pieces() {
        let opposite = around(&[(Direction::North, Tile::A), (Direction::South, Tile::B)]);
        assert_eq!(
            placeable_orientations(&opposite),
            vec![Piece::Slash, Piece::Backslash]
        );

        let north_east = around(&[(Direction::North, Tile::A), (Direction::East, Tile::A)]);
        assert_eq!(
            placeable_orientations(&north_east),
            vec![Piece::Straight, Piece::Slash]
        );

        let south_east = around(&[(Direction::South, Tile::A), (Direction::East, Tile::A)]);
        assert_eq!(
            placeable_orientations(&south_east),
            vec![Piece::Straight, Piece::Backslash]
        );
    }

    #[test]
    fn test_isolated_cell_allows_nothing() {
        assert!(placeable_orientations(&[None; 4]).is_empty());
    }

    #[test]
    fn test_resolve_matches_incoming_colour() {
        // Tile A to the north presents White on its south edge.
        let n = around(&[(Direction::North, Tile::A)]);
        assert_eq!(resolve(Piece::Straight, &n), Some(Tile::A));
        assert_eq!(resolve(Piece::Slash, &n), Some(Tile::C));
        assert_eq!(resolve(Piece::Backslash, &n), Some(Tile::E));
    }

    #[test]
    fn test_resolve_two_neighbours() {
        // White from the north, Red from the east.
        let n = around(&[(Direction::North, Tile::A), (Direction::East, Tile::A)]);
        assert_eq!(resolve(Piece::Straight, &n), Some(Tile::A));
        assert_eq!(resolve(Piece::Slash, &n), Some(Tile::C));
        assert_eq!(resolve(Piece::Backslash, &n), None);
    }
}
