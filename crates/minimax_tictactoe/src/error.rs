//! Game error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong with a requested game action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Target cell is occupied or outside 0-8.
    #[display("Invalid move: position {} is not available", position)]
    InvalidMove {
        /// Requested board index.
        position: usize,
    },
    /// A move was attempted after the game reached a terminal state.
    #[display("Game over. Please reset the game.")]
    GameOver,
    /// Undo was requested with an empty undo slot.
    #[display("No moves to undo")]
    NothingToUndo,
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> GameErrorKind {
        self.kind
    }
}
