//! Turn and status state machine for a human-versus-engine game.
//!
//! A [`Game`] owns the live board, its cached [`GameStatus`] and a single
//! undo slot. Every human move is answered by the engine within the same
//! call, so from the caller's point of view the game is always either
//! waiting for the human or finished.

use crate::error::{GameError, GameErrorKind};
use crate::invariants::{GameInvariants, InvariantSet};
use crate::rules::{classify, has_three_in_row, is_draw};
use crate::search::best_move;
use crate::types::{Board, Cell, GameStatus, Side};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

/// A saved board and status, restored by [`Game::undo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, new, Getters)]
pub struct UndoEntry {
    board: Board,
    status: GameStatus,
}

/// Result of a successful human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MoveOutcome {
    board: Board,
    status: GameStatus,
    ai_move: Option<usize>,
}

/// Result of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ResetOutcome {
    board: Board,
    first: Side,
}

/// Read-only view of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Snapshot {
    board: Board,
    status: GameStatus,
    can_undo: bool,
}

/// Human-versus-engine tic-tac-toe game.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    status: GameStatus,
    /// At most one level of undo is ever available.
    undo: Option<UndoEntry>,
    first: Side,
}

impl Game {
    /// Creates a new game with the human to move on an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new game opened by `first`.
    #[instrument]
    pub fn with_first(first: Side) -> Self {
        let mut game = Self::new();
        game.reset(first);
        game
    }

    /// Returns a copy of the board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Returns the cached status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns who opened the current game.
    pub fn first(&self) -> Side {
        self.first
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// True when an undo entry is available.
    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Returns a copy of the visible state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            status: self.status,
            can_undo: self.can_undo(),
        }
    }

    /// Plays the human's mark at `position` and answers with the engine.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::GameOver`] if the game is already won or drawn.
    /// - [`GameErrorKind::InvalidMove`] if `position` is outside 0-8 or
    ///   occupied.
    ///
    /// A rejected move leaves the game untouched.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn apply_human_move(&mut self, position: usize) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            warn!("Move attempted after game over");
            return Err(GameError::new(GameErrorKind::GameOver));
        }
        if !self.board.is_empty_at(position) {
            warn!("Target cell unavailable");
            return Err(GameError::new(GameErrorKind::InvalidMove { position }));
        }

        self.undo = Some(UndoEntry::new(self.board, self.status));
        self.board.set(position, Cell::Human)?;

        if has_three_in_row(&self.board, Side::Human) {
            return Ok(self.finish_turn(GameStatus::HumanWin, None));
        }
        if is_draw(&self.board) {
            return Ok(self.finish_turn(GameStatus::Draw, None));
        }

        let ai_move = best_move(&self.board);
        if let Some(pos) = ai_move {
            self.board.set(pos, Cell::Ai)?;
        }

        let status = classify(&self.board);
        Ok(self.finish_turn(status, ai_move))
    }

    /// Clears the board, status and undo slot, then lets the engine open
    /// when `first` is [`Side::Ai`].
    #[instrument(skip(self))]
    pub fn reset(&mut self, first: Side) -> ResetOutcome {
        self.board = Board::new();
        self.status = GameStatus::Ongoing;
        self.undo = None;
        self.first = first;

        if first == Side::Ai {
            if let Some(pos) = best_move(&self.board) {
                // An empty board always has room.
                self.board.put(pos, Cell::Ai);
                debug!(ai_move = pos, "Engine opened");
            }
        }

        self.check_invariants();
        info!(first = %first, "Game reset");
        ResetOutcome {
            board: self.board,
            first,
        }
    }

    /// Restores the state saved before the last human move.
    ///
    /// This reverts both the human move and the engine's reply, and empties
    /// the undo slot.
    ///
    /// # Errors
    ///
    /// [`GameErrorKind::NothingToUndo`] if the slot is empty.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Board, GameError> {
        let entry = self.undo.take().ok_or_else(|| {
            warn!("Nothing to undo");
            GameError::new(GameErrorKind::NothingToUndo)
        })?;

        self.board = entry.board;
        self.status = entry.status;
        self.check_invariants();
        info!(status = %self.status, "Undo applied");
        Ok(self.board)
    }

    fn finish_turn(&mut self, status: GameStatus, ai_move: Option<usize>) -> MoveOutcome {
        self.status = status;
        self.check_invariants();
        info!(status = %status, ai_move = ?ai_move, "Move completed");
        MoveOutcome {
            board: self.board,
            status,
            ai_move,
        }
    }

    fn check_invariants(&self) {
        let checked = GameInvariants::check_all(self);
        debug_assert!(checked.is_ok(), "invariant violations: {checked:?}");
        if let Err(violations) = checked {
            warn!(?violations, "Game invariants violated");
        }
    }
}
