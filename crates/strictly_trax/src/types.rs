//! Core domain types for Trax.

use serde::{Deserialize, Serialize};

/// Player in the game.
///
/// Players own a line colour, not a set of tiles: either player may place
/// any tile, and each tile carries one line of each colour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum Player {
    /// Player 1 (moves first).
    White,
    /// Player 2.
    Red,
}

impl Player {
    /// Both players, player 1 first.
    pub const ALL: [Player; 2] = [Player::White, Player::Red];

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Red,
            Player::Red => Player::White,
        }
    }
}

/// One of the four tile edges.
///
/// Absolute coordinates grow toward the south, so `North` is `y - 1`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum Direction {
    /// Up (`y - 1`).
    North,
    /// Right (`x + 1`).
    East,
    /// Down (`y + 1`).
    South,
    /// Left (`x - 1`).
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit step `(dx, dy)` in absolute coordinates.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Index into `[_; 4]` neighbour arrays, matching [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// Orientation symbol chosen by the player when placing.
///
/// A piece resolves to one of two tiles depending on the lines already
/// entering the target cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Piece {
    /// `+`: both lines run straight through.
    Straight,
    /// `/`: curves in the north-west and south-east corners.
    Slash,
    /// `\`: curves in the north-east and south-west corners.
    Backslash,
}

impl Piece {
    /// All pieces in notation order.
    pub const ALL: [Piece; 3] = [Piece::Straight, Piece::Slash, Piece::Backslash];

    /// Notation symbol of the piece.
    pub fn symbol(self) -> char {
        match self {
            Piece::Straight => '+',
            Piece::Slash => '/',
            Piece::Backslash => '\\',
        }
    }

    /// Parses a notation symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Piece::Straight),
            '/' => Some(Piece::Slash),
            '\\' => Some(Piece::Backslash),
            _ => None,
        }
    }

    /// The two tiles drawn with this symbol, differing only by colour swap.
    pub fn tiles(self) -> [Tile; 2] {
        match self {
            Piece::Straight => [Tile::A, Tile::B],
            Piece::Slash => [Tile::C, Tile::D],
            Piece::Backslash => [Tile::E, Tile::F],
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A placed tile: a fixed routing of both players' lines through its edges.
///
/// | Tile | Piece | White   | Red     |
/// |------|-------|---------|---------|
/// | A    | `+`   | N, S    | E, W    |
/// | B    | `+`   | E, W    | N, S    |
/// | C    | `/`   | N, W    | S, E    |
/// | D    | `/`   | S, E    | N, W    |
/// | E    | `\`   | N, E    | S, W    |
/// | F    | `\`   | S, W    | N, E    |
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Tile {
    /// White straight north-south.
    A,
    /// White straight east-west.
    B,
    /// White curve north-west.
    C,
    /// White curve south-east.
    D,
    /// White curve north-east.
    E,
    /// White curve south-west.
    F,
}

impl Tile {
    /// All six tiles.
    pub const ALL: [Tile; 6] = [Tile::A, Tile::B, Tile::C, Tile::D, Tile::E, Tile::F];

    /// The symbol this tile is drawn with.
    pub fn piece(self) -> Piece {
        match self {
            Tile::A | Tile::B => Piece::Straight,
            Tile::C | Tile::D => Piece::Slash,
            Tile::E | Tile::F => Piece::Backslash,
        }
    }

    /// The player whose line crosses the given edge.
    pub fn player_at(self, direction: Direction) -> Player {
        crate::neighbours::facing(direction, self)
    }

    /// The two edges carrying the given player's line.
    pub fn edges(self, player: Player) -> [Direction; 2] {
        let mut out = [Direction::North; 2];
        let mut n = 0;
        for dir in Direction::ALL {
            if self.player_at(dir) == player {
                out[n] = dir;
                n += 1;
            }
        }
        out
    }
}

/// Largest absolute coordinate a board cell may have on either axis.
pub const COORD_LIMIT: i32 = 1 << 30;

/// A cell in absolute board coordinates.
///
/// Absolute coordinates have no fixed origin beyond the first move, which
/// always lands on `(0, 0)`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Cell {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing south.
    pub y: i32,
}

impl Cell {
    /// Canonical cell of the first move.
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    /// Packs the coordinates into one storage key.
    pub fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    /// Inverse of [`Cell::key`].
    pub fn from_key(key: u64) -> Self {
        Self {
            x: (key >> 32) as u32 as i32,
            y: key as u32 as i32,
        }
    }

    /// Whether both coordinates lie within [`COORD_LIMIT`].
    pub fn in_bounds(self) -> bool {
        self.x.unsigned_abs() <= COORD_LIMIT.unsigned_abs()
            && self.y.unsigned_abs() <= COORD_LIMIT.unsigned_abs()
    }

    /// The adjacent cell in the given direction, `None` past the `i32` range.
    pub fn checked_neighbour(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// The adjacent cell in the given direction.
    ///
    /// # Panics
    ///
    /// Panics if the step leaves the `i32` range. Board cells stay within
    /// [`COORD_LIMIT`], so their neighbours never do.
    pub fn neighbour(self, direction: Direction) -> Self {
        self.checked_neighbour(direction)
            .unwrap_or_else(|| panic!("cell {self} has no neighbour to the {direction}"))
    }

    /// The four adjacent cells, indexed like [`Direction::ALL`].
    pub fn neighbours(self) -> [Cell; 4] {
        Direction::ALL.map(|dir| self.neighbour(dir))
    }

    /// Direction from `self` to an adjacent `other`, if they touch.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| self.checked_neighbour(*dir) == Some(other))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A tile written into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Placement {
    /// Where the tile sits.
    pub cell: Cell,
    /// Which tile.
    pub tile: Tile,
}
