//! Sparse, unbounded Trax board.
//!
//! Tiles are stored by packed absolute coordinate. The board grows in any
//! direction as tiles are placed and never shrinks: a tile, once set, is
//! never replaced or removed.
//!
//! Three coordinate spaces are in play:
//!
//! - **absolute** ([`Cell`]): storage coordinates, y growing south;
//! - **relative**: shifted so `(0, 0)` is one cell outside the top-left
//!   corner of the occupied extent, used for display grids;
//! - **notation** ([`NotationCell`]): column letters and row number, with
//!   column `@` one outside the left edge and row `0` one outside the bottom
//!   edge, y growing north.

use crate::error::{TraxError, TraxErrorKind};
use crate::neighbours::{Neighbourhood, incoming};
use crate::notation::NotationCell;
use crate::types::{COORD_LIMIT, Cell, Direction, Placement, Tile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

/// Bounding box of the occupied cells, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extents {
    /// Leftmost occupied column.
    pub min_x: i32,
    /// Rightmost occupied column.
    pub max_x: i32,
    /// Topmost occupied row.
    pub min_y: i32,
    /// Bottommost occupied row.
    pub max_y: i32,
}

impl Extents {
    fn around(cell: Cell) -> Self {
        Self {
            min_x: cell.x,
            max_x: cell.x,
            min_y: cell.y,
            max_y: cell.y,
        }
    }

    fn include(&mut self, cell: Cell) {
        self.min_x = self.min_x.min(cell.x);
        self.max_x = self.max_x.max(cell.x);
        self.min_y = self.min_y.min(cell.y);
        self.max_y = self.max_y.max(cell.y);
    }

    /// Number of occupied columns spanned.
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x).saturating_add(1)
    }

    /// Number of occupied rows spanned.
    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y).saturating_add(1)
    }

    /// Whether `(x, y)` lies inside the box grown by one cell on every side.
    fn frames(&self, x: i64, y: i64) -> bool {
        (i64::from(self.min_x) - 1..=i64::from(self.max_x) + 1).contains(&x)
            && (i64::from(self.min_y) - 1..=i64::from(self.max_y) + 1).contains(&y)
    }

    /// Whether the cell lies inside the box.
    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x) && (self.min_y..=self.max_y).contains(&cell.y)
    }
}

/// Hash contribution of one placement.
///
/// Zobrist-style: the board fingerprint is the XOR of every placement's
/// value, so it updates in O(1) and ignores placement order.
fn placement_hash(placement: Placement) -> u64 {
    // SplitMix64 finaliser.
    let salt = (placement.tile as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut z = placement.cell.key() ^ salt;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sparse growable board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Placement>", try_from = "Vec<Placement>")]
pub struct Board {
    tiles: HashMap<u64, Tile>,
    order: Vec<Placement>,
    extents: Option<Extents>,
    fingerprint: u64,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from placements in the order they were made.
    ///
    /// # Errors
    ///
    /// Returns `IllegalPlacement` if a cell repeats, lies beyond
    /// [`COORD_LIMIT`], or a placement after the first touches no earlier
    /// tile.
    #[instrument(skip(placements))]
    pub fn from_placements(
        placements: impl IntoIterator<Item = Placement>,
    ) -> Result<Self, TraxError> {
        let mut board = Self::new();
        for Placement { cell, tile } in placements {
            if !cell.in_bounds() {
                return Err(TraxErrorKind::IllegalPlacement(format!(
                    "cell {cell} lies beyond the coordinate limit {COORD_LIMIT}"
                ))
                .into());
            }
            if board.has(cell) {
                return Err(TraxErrorKind::IllegalPlacement(format!(
                    "cell {cell} placed twice"
                ))
                .into());
            }
            if !board.is_empty() && board.occupied_count(cell) == 0 {
                return Err(TraxErrorKind::IllegalPlacement(format!(
                    "cell {cell} touches no earlier tile"
                ))
                .into());
            }
            board.set(cell, tile);
        }
        Ok(board)
    }

    /// Gets the tile at the given cell.
    pub fn get(&self, cell: Cell) -> Option<Tile> {
        self.tiles.get(&cell.key()).copied()
    }

    /// Checks if a cell holds a tile.
    pub fn has(&self, cell: Cell) -> bool {
        self.tiles.contains_key(&cell.key())
    }

    /// Writes a tile into an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already occupied or lies beyond
    /// [`COORD_LIMIT`]. Placement is monotonic, so overwriting means the
    /// caller skipped validation.
    pub fn set(&mut self, cell: Cell, tile: Tile) {
        assert!(cell.in_bounds(), "cell {cell} lies beyond the coordinate limit");
        let previous = self.tiles.insert(cell.key(), tile);
        assert!(previous.is_none(), "cell {cell} is already occupied");
        let placement = Placement::new(cell, tile);
        self.fingerprint ^= placement_hash(placement);
        self.order.push(placement);
        match self.extents.as_mut() {
            Some(extents) => extents.include(cell),
            None => self.extents = Some(Extents::around(cell)),
        }
    }

    /// Number of tiles on the board.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks if no tile has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All placements in the order they were made.
    pub fn placements(&self) -> &[Placement] {
        &self.order
    }

    /// Iterates over occupied cells and their tiles, in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.order.iter().map(|p| (p.cell, p.tile))
    }

    /// Hash of the occupied cells and their tiles.
    ///
    /// Equal boards have equal fingerprints whatever order their tiles were
    /// placed in.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Tracked bounding box, `None` on an empty board.
    pub fn extents(&self) -> Option<Extents> {
        self.extents
    }

    /// Bounding box recomputed from the occupied set.
    pub fn recompute_extents(&self) -> Option<Extents> {
        let mut cells = self.tiles.keys().map(|k| Cell::from_key(*k));
        let first = cells.next()?;
        let mut extents = Extents::around(first);
        cells.for_each(|c| extents.include(c));
        Some(extents)
    }

    /// Occupied width, zero on an empty board.
    pub fn width(&self) -> u32 {
        self.extents.map_or(0, |e| e.width())
    }

    /// Occupied height, zero on an empty board.
    pub fn height(&self) -> u32 {
        self.extents.map_or(0, |e| e.height())
    }

    /// Whether column `x` lies outside the occupied extent.
    pub fn expands_x(&self, x: i32) -> bool {
        self.extents.is_none_or(|e| x < e.min_x || x > e.max_x)
    }

    /// Whether row `y` lies outside the occupied extent.
    pub fn expands_y(&self, y: i32) -> bool {
        self.extents.is_none_or(|e| y < e.min_y || y > e.max_y)
    }

    /// Whether placing at `cell` would grow either axis beyond `max_extent`.
    pub fn would_exceed(&self, cell: Cell, max_extent: u32) -> bool {
        let Some(mut grown) = self.extents else {
            return max_extent == 0;
        };
        if !self.expands_x(cell.x) && !self.expands_y(cell.y) {
            return false;
        }
        grown.include(cell);
        grown.width() > max_extent || grown.height() > max_extent
    }

    /// Tiles around a cell, indexed like [`Direction::ALL`].
    pub fn neighbourhood(&self, cell: Cell) -> Neighbourhood {
        cell.neighbours().map(|n| self.get(n))
    }

    /// Number of occupied cells adjacent to `cell`.
    pub fn occupied_count(&self, cell: Cell) -> usize {
        cell.neighbours().iter().filter(|n| self.has(**n)).count()
    }

    /// Empty cells adjacent to `cell`.
    pub fn empty_neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbours().into_iter().filter(|n| !self.has(*n))
    }

    /// Empty cells with at least one occupied neighbour, sorted.
    pub fn frontier(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .order
            .iter()
            .flat_map(|p| self.empty_neighbours(p.cell))
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// Whether the shared boundary between `cell` and its neighbour in
    /// `direction` is coloured the same from both sides (or open).
    pub fn boundary_agrees(&self, cell: Cell, direction: Direction) -> bool {
        match (self.get(cell), self.get(cell.neighbour(direction))) {
            (Some(here), Some(there)) => {
                here.player_at(direction) == there.player_at(direction.opposite())
            }
            _ => true,
        }
    }

    /// Whether an empty cell has two lines of one player entering it.
    pub fn is_pending(&self, cell: Cell) -> bool {
        if self.has(cell) {
            return false;
        }
        let lines = incoming(&self.neighbourhood(cell));
        crate::types::Player::ALL
            .into_iter()
            .any(|p| lines.iter().filter(|l| **l == Some(p)).count() >= 2)
    }

    fn require_extents(&self) -> Result<Extents, TraxError> {
        self.extents
            .ok_or_else(|| TraxError::new(TraxErrorKind::EmptyBoard))
    }

    /// Converts an absolute cell to relative render coordinates.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBoard` if no tile has been placed and `OutsideFrame`
    /// if the result does not fit in `i32`.
    pub fn to_relative(&self, cell: Cell) -> Result<(i32, i32), TraxError> {
        let e = self.require_extents()?;
        let rx = i64::from(cell.x) - i64::from(e.min_x) + 1;
        let ry = i64::from(cell.y) - i64::from(e.min_y) + 1;
        match (i32::try_from(rx), i32::try_from(ry)) {
            (Ok(rx), Ok(ry)) => Ok((rx, ry)),
            _ => Err(TraxErrorKind::OutsideFrame(cell).into()),
        }
    }

    /// Converts relative render coordinates to an absolute cell.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBoard` if no tile has been placed and
    /// `IllegalPlacement` if the result does not fit in `i32`.
    pub fn from_relative(&self, rx: i32, ry: i32) -> Result<Cell, TraxError> {
        let e = self.require_extents()?;
        let x = i64::from(rx) + i64::from(e.min_x) - 1;
        let y = i64::from(ry) + i64::from(e.min_y) - 1;
        match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Cell::new(x, y)),
            _ => Err(TraxErrorKind::IllegalPlacement(format!(
                "relative ({rx}, {ry}) is out of range"
            ))
            .into()),
        }
    }

    /// Converts an absolute cell to notation coordinates.
    ///
    /// Notation is defined on the one-cell frame around the extents, which
    /// holds every cell a move can target. Column and row numbers cannot go
    /// below zero, so cells further left or further down have no notation;
    /// cells further right or up are rejected the same way so that
    /// [`Board::from_notation`] inverts this exactly.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBoard` on an empty board and `OutsideFrame` for cells
    /// outside the frame.
    pub fn to_notation(&self, cell: Cell) -> Result<NotationCell, TraxError> {
        let e = self.require_extents()?;
        if !e.frames(i64::from(cell.x), i64::from(cell.y)) {
            return Err(TraxErrorKind::OutsideFrame(cell).into());
        }
        let column = i64::from(cell.x) - i64::from(e.min_x) + 1;
        let row = i64::from(e.max_y) + 1 - i64::from(cell.y);
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => Ok(NotationCell::new(column, row)),
            _ => Err(TraxErrorKind::OutsideFrame(cell).into()),
        }
    }

    /// Converts notation coordinates to an absolute cell.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBoard` if no tile has been placed and
    /// `IllegalPlacement` for references outside the one-cell frame around
    /// the extents.
    pub fn from_notation(&self, at: NotationCell) -> Result<Cell, TraxError> {
        let e = self.require_extents()?;
        let x = i64::from(at.column) + i64::from(e.min_x) - 1;
        let y = i64::from(e.max_y) + 1 - i64::from(at.row);
        if !e.frames(x, y) {
            return Err(TraxErrorKind::IllegalPlacement(format!(
                "{at} lies outside the board frame"
            ))
            .into());
        }
        match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Cell::new(x, y)),
            _ => Err(TraxErrorKind::IllegalPlacement(format!("{at} is out of range")).into()),
        }
    }

    /// Formats the occupied extent as a grid of piece symbols.
    pub fn render(&self) -> String {
        let Some(e) = self.extents else {
            return String::new();
        };
        let mut result = String::new();
        for y in e.min_y..=e.max_y {
            for x in e.min_x..=e.max_x {
                let symbol = self
                    .get(Cell::new(x, y))
                    .map_or('.', |t| t.piece().symbol());
                result.push(symbol);
            }
            if y < e.max_y {
                result.push('\n');
            }
        }
        result
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<Board> for Vec<Placement> {
    fn from(board: Board) -> Self {
        board.order
    }
}

impl TryFrom<Vec<Placement>> for Board {
    type Error = TraxError;

    fn try_from(placements: Vec<Placement>) -> Result<Self, Self::Error> {
        Board::from_placements(placements)
    }
}
