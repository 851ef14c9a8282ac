//! Legal move generation and move validation.
//!
//! Every check runs against a scratch copy of the board. A move is legal
//! when its cell is placeable, its piece resolves to a tile, and the forced
//! play it triggers settles without contradiction.

use crate::action::Move;
use crate::board::Board;
use crate::cascade::{Cascade, preview};
use crate::config::GameConfig;
use crate::error::{TraxError, TraxErrorKind};
use crate::neighbours::{placeable_orientations, resolve};
use crate::types::{COORD_LIMIT, Cell, Piece, Placement, Tile};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Pieces allowed on the empty board. `\` is a mirror image of `/` there.
pub const OPENING_PIECES: [Piece; 2] = [Piece::Straight, Piece::Slash];

/// A move proven legal on a specific board, with its full consequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    mv: Move,
    tile: Tile,
    forced: Vec<Placement>,
    base: usize,
    position: u64,
}

impl LegalMove {
    /// The validated move.
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Tile the piece resolves to.
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Tiles the move forces, in the order they would be written.
    pub fn forced(&self) -> &[Placement] {
        &self.forced
    }

    /// Tile count of the board the move was validated on.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Fingerprint of the board the move was validated on.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the move was validated on exactly this board.
    pub fn belongs_to(&self, board: &Board) -> bool {
        self.base == board.len() && self.position == board.fingerprint() && !board.has(self.mv.cell)
    }

    /// The chosen tile followed by every forced tile.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        std::iter::once(Placement::new(self.mv.cell, self.tile)).chain(self.forced.iter().copied())
    }
}

fn opening_tile(piece: Piece) -> Option<Tile> {
    match piece {
        Piece::Straight => Some(Tile::A),
        Piece::Slash => Some(Tile::C),
        Piece::Backslash => None,
    }
}

fn illegal(reason: String) -> TraxError {
    TraxError::new(TraxErrorKind::IllegalPlacement(reason))
}

/// Checks that a tile may go on `cell` at all, before any cascade.
fn check_cell(board: &Board, cell: Cell, config: &GameConfig) -> Result<(), TraxError> {
    if !cell.in_bounds() {
        return Err(illegal(format!(
            "cell {cell} lies beyond the coordinate limit {COORD_LIMIT}"
        )));
    }
    if board.has(cell) {
        return Err(illegal(format!("cell {cell} is occupied")));
    }
    if board.occupied_count(cell) == 0 {
        return Err(illegal(format!("cell {cell} touches no tile")));
    }
    if let Some(max) = *config.max_extent()
        && board.would_exceed(cell, max)
    {
        return Err(illegal(format!("cell {cell} grows the board past {max}")));
    }
    Ok(())
}

/// Resolves the piece on `cell` and runs its cascade on a copy.
fn check_piece(board: &Board, mv: Move) -> Result<LegalMove, TraxError> {
    let neighbours = board.neighbourhood(mv.cell);
    if !placeable_orientations(&neighbours).contains(&mv.piece) {
        return Err(illegal(format!("{} cannot be placed at {}", mv.piece, mv.cell)));
    }
    let tile = resolve(mv.piece, &neighbours)
        .ok_or_else(|| illegal(format!("{} does not match the lines at {}", mv.piece, mv.cell)))?;

    match preview(board, Placement::new(mv.cell, tile)) {
        Cascade::Forced(forced) => Ok(LegalMove {
            mv,
            tile,
            forced,
            base: board.len(),
            position: board.fingerprint(),
        }),
        Cascade::Contradiction { cell } => Err(TraxErrorKind::IllegalCascade(cell).into()),
    }
}

/// Validates a move against a board.
///
/// # Errors
///
/// Returns `IllegalPlacement` for an occupied, isolated or out-of-bounds
/// cell, or a piece that cannot go there, and `IllegalCascade` when the
/// forced play it triggers is contradictory.
#[instrument(skip(board, config), fields(tiles = board.len()))]
pub fn validate(board: &Board, mv: Move, config: &GameConfig) -> Result<LegalMove, TraxError> {
    if board.is_empty() {
        if mv.cell != Cell::ORIGIN {
            return Err(illegal(format!("first move must be at {}", Cell::ORIGIN)));
        }
        let tile = opening_tile(mv.piece)
            .ok_or_else(|| illegal(format!("{} is not an opening piece", mv.piece)))?;
        return Ok(LegalMove {
            mv,
            tile,
            forced: Vec::new(),
            base: 0,
            position: board.fingerprint(),
        });
    }

    check_cell(board, mv.cell, config)?;
    check_piece(board, mv)
}

/// Empty cells a tile may go on, sorted.
#[instrument(skip(board, config))]
pub fn candidate_cells(board: &Board, config: &GameConfig) -> Vec<Cell> {
    if board.is_empty() {
        return vec![Cell::ORIGIN];
    }
    board
        .frontier()
        .into_iter()
        .filter(|cell| check_cell(board, *cell, config).is_ok())
        .collect()
}

fn candidate_moves<'a>(
    board: &'a Board,
    config: &'a GameConfig,
) -> impl Iterator<Item = LegalMove> + 'a {
    let opening = board.is_empty();
    candidate_cells(board, config)
        .into_iter()
        .flat_map(move |cell| {
            let pieces = if opening {
                OPENING_PIECES.to_vec()
            } else {
                placeable_orientations(&board.neighbourhood(cell))
            };
            pieces.into_iter().map(move |piece| Move::new(cell, piece))
        })
        .filter_map(move |mv| validate(board, mv, config).ok())
}

/// All legal moves, each with the tiles it would force.
#[instrument(skip(board, config), fields(tiles = board.len()))]
pub fn legal_moves(board: &Board, config: &GameConfig) -> Vec<LegalMove> {
    let moves: Vec<LegalMove> = candidate_moves(board, config).collect();
    debug!(count = moves.len(), "Generated legal moves");
    moves
}

/// Whether at least one legal move exists. Stops at the first one found.
#[instrument(skip(board, config), fields(tiles = board.len()))]
pub fn has_any_legal_move(board: &Board, config: &GameConfig) -> bool {
    candidate_moves(board, config).next().is_some()
}
