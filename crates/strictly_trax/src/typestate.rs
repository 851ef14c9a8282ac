//! Phase-specific typestate structs for Trax.
//!
//! Each phase is its own distinct type with phase-specific fields.
//! A `GameFinished` ALWAYS has an outcome, not `Option<Outcome>`.

use crate::action::{HistoryEntry, Move};
use crate::board::Board;
use crate::config::GameConfig;
use crate::connectivity::{Win, evaluate};
use crate::contracts::{Contract, MoveContract};
use crate::error::{TraxError, TraxErrorKind};
use crate::movegen::{LegalMove, OPENING_PIECES, has_any_legal_move, legal_moves};
use crate::neighbours::placeable_orientations;
use crate::phases::Outcome;
use crate::types::{Cell, Piece, Player};
use tracing::{info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start.
///
/// The board is always empty.
#[derive(Debug, Clone)]
pub struct GameSetup {
    config: GameConfig,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Returns the rule configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Starts the game with White to move (consumes setup, returns in-progress).
    #[instrument(skip(self))]
    pub fn start(self) -> GameInProgress {
        GameInProgress::from_board(Board::new(), Player::White, self.config)
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new(GameConfig::standard())
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
///
/// The live board is only written by [`GameInProgress::commit`], and only
/// with a move whose cascade has already run on a copy.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) base: Board,
    pub(crate) board: Board,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) to_move: Player,
    pub(crate) config: GameConfig,
}

impl GameInProgress {
    /// Resumes a game from an existing position.
    ///
    /// `board` becomes the base the move history is replayed on.
    #[instrument(skip(board), fields(tiles = board.len()))]
    pub fn from_board(board: Board, to_move: Player, config: GameConfig) -> Self {
        Self {
            base: board.clone(),
            board,
            history: Vec::new(),
            to_move,
            config,
        }
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the rule configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Orientations offered for a cell, before any cascade check.
    pub fn placeable_orientations(&self, cell: Cell) -> Vec<Piece> {
        if self.board.is_empty() {
            return if cell == Cell::ORIGIN {
                OPENING_PIECES.to_vec()
            } else {
                Vec::new()
            };
        }
        if self.board.has(cell) {
            return Vec::new();
        }
        placeable_orientations(&self.board.neighbourhood(cell))
    }

    /// Returns every legal move with its forced tiles.
    #[instrument(skip(self))]
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        legal_moves(&self.board, &self.config)
    }

    /// Whether any legal move remains.
    pub fn has_any_legal_move(&self) -> bool {
        has_any_legal_move(&self.board, &self.config)
    }

    /// Validates a move without touching the board.
    ///
    /// The result carries the full set of forced tiles, so it doubles as a
    /// preview of the move's consequence.
    #[instrument(skip(self))]
    pub fn validate(&self, mv: Move) -> Result<LegalMove, TraxError> {
        MoveContract::pre(self, &mv)
    }

    /// Parses, validates and plays a move in notation.
    #[instrument(skip(self))]
    pub fn play_notation(&self, input: &str) -> Result<GameResult, TraxError> {
        let mv = Move::parse(input, &self.board)?;
        self.play(mv)
    }

    /// Validates a move and plays it on a copy of the game.
    ///
    /// On error `self` is untouched.
    #[instrument(skip(self))]
    pub fn play(&self, mv: Move) -> Result<GameResult, TraxError> {
        let legal = self.validate(mv)?;
        self.clone().commit(legal)
    }

    /// Writes a validated move and its forced tiles, then checks for a win.
    ///
    /// # Panics
    ///
    /// Panics if `legal` was validated against a different position.
    #[instrument(skip(self, legal), fields(mv = %legal.mv(), forced = legal.forced().len()))]
    pub fn commit(mut self, legal: LegalMove) -> Result<GameResult, TraxError> {
        assert!(
            legal.belongs_to(&self.board),
            "move {} was not validated against this position",
            legal.mv()
        );

        #[cfg(debug_assertions)]
        let before = self.clone();

        let notation = legal.mv().to_notation(&self.board)?;
        for placement in legal.placements() {
            self.board.set(placement.cell, placement.tile);
        }
        self.history.push(HistoryEntry {
            mv: legal.mv(),
            notation,
            tile: legal.tile(),
            forced: legal.forced().to_vec(),
        });
        info!(player = %self.to_move, tiles = self.board.len(), "Move committed");

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &self)?;

        let wins = evaluate(&self.board, &self.config);
        if !wins.is_empty() {
            // A move that completes lines for both players wins for the mover.
            let mover = self.to_move;
            let winner = if wins.iter().any(|w| w.player == mover) {
                mover
            } else {
                mover.opponent()
            };
            info!(%winner, lines = wins.len(), "Game won");
            return Ok(GameResult::Finished(self.finish(Outcome::Winner(winner), wins)));
        }

        if self.config.max_extent().is_some() && !self.has_any_legal_move() {
            info!("No legal move left, game drawn");
            return Ok(GameResult::Finished(self.finish(Outcome::Draw, Vec::new())));
        }

        self.to_move = self.to_move.opponent();
        Ok(GameResult::InProgress(self))
    }

    fn finish(self, outcome: Outcome, wins: Vec<Win>) -> GameFinished {
        GameFinished {
            board: self.board,
            history: self.history,
            config: self.config,
            outcome,
            wins,
        }
    }

    /// Replays moves from an empty board.
    ///
    /// # Errors
    ///
    /// Returns the first move's validation error, or `GameOver` if moves
    /// remain after the game has finished.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(config: GameConfig, moves: &[Move]) -> Result<GameResult, TraxError> {
        let mut game = GameSetup::new(config).start();
        for (i, mv) in moves.iter().enumerate() {
            match game.play(*mv)? {
                GameResult::InProgress(next) => game = next,
                GameResult::Finished(done) if i + 1 == moves.len() => {
                    return Ok(GameResult::Finished(done));
                }
                GameResult::Finished(_) => return Err(TraxErrorKind::GameOver.into()),
            }
        }
        Ok(GameResult::InProgress(game))
    }

    /// Replays notation moves from an empty board.
    ///
    /// # Errors
    ///
    /// As [`GameInProgress::replay`], plus notation errors.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay_notation<S: AsRef<str>>(
        config: GameConfig,
        moves: &[S],
    ) -> Result<GameResult, TraxError> {
        let mut game = GameSetup::new(config).start();
        for (i, input) in moves.iter().enumerate() {
            match game.play_notation(input.as_ref())? {
                GameResult::InProgress(next) => game = next,
                GameResult::Finished(done) if i + 1 == moves.len() => {
                    return Ok(GameResult::Finished(done));
                }
                GameResult::Finished(_) => return Err(TraxErrorKind::GameOver.into()),
            }
        }
        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: Vec<HistoryEntry>,
    config: GameConfig,
    outcome: Outcome,
    wins: Vec<Win>,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Every winning line found by the final move, for both players.
    pub fn wins(&self) -> &[Win] {
        &self.wins
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Restarts the game under the same rules (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new(self.config)
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}

impl GameResult {
    /// Returns the board in either phase.
    pub fn board(&self) -> &Board {
        match self {
            GameResult::InProgress(game) => game.board(),
            GameResult::Finished(game) => game.board(),
        }
    }

    /// Returns the history in either phase.
    pub fn history(&self) -> &[HistoryEntry] {
        match self {
            GameResult::InProgress(game) => game.history(),
            GameResult::Finished(game) => game.history(),
        }
    }

    /// The in-progress game, if the game continues.
    pub fn into_in_progress(self) -> Option<GameInProgress> {
        match self {
            GameResult::InProgress(game) => Some(game),
            GameResult::Finished(_) => None,
        }
    }

    /// The finished game, if the game ended.
    pub fn into_finished(self) -> Option<GameFinished> {
        match self {
            GameResult::InProgress(_) => None,
            GameResult::Finished(game) => Some(game),
        }
    }
}
