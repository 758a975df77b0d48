//! The shared game session.
//!
//! One [`GameSession`] is created by the server at startup and handed to
//! every request handler. All access goes through an async mutex, so
//! requests are applied one at a time and each sees a consistent board.

use derive_more::{Display, Error};
use minimax_tictactoe::{Board, Game, GameError, MoveOutcome, ResetOutcome, Side, Snapshot};
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// A rejected game action, with the unchanged board for the caller.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", error.kind())]
pub struct Rejection {
    /// Why the action was rejected.
    #[error(source)]
    pub error: GameError,
    /// The board at the time of rejection.
    pub board: Board,
}

/// Serialised access to the single game.
#[derive(Debug)]
pub struct GameSession {
    game: Mutex<Game>,
}

impl GameSession {
    /// Creates a session whose first game is opened by `first`.
    #[instrument]
    pub fn new(first: Side) -> Self {
        info!(first = %first, "Creating game session");
        Self {
            game: Mutex::new(Game::with_first(first)),
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> Snapshot {
        self.game.lock().await.snapshot()
    }

    /// Applies a human move and the engine's reply.
    #[instrument(skip(self))]
    pub async fn play(&self, position: usize) -> Result<MoveOutcome, Rejection> {
        let mut game = self.game.lock().await;
        game.apply_human_move(position).map_err(|error| Rejection {
            error,
            board: game.board(),
        })
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    pub async fn reset(&self, first: Side) -> ResetOutcome {
        self.game.lock().await.reset(first)
    }

    /// Reverts the last human move and the engine's reply.
    #[instrument(skip(self))]
    pub async fn undo(&self) -> Result<Board, Rejection> {
        let mut game = self.game.lock().await;
        game.undo().map_err(|error| Rejection {
            error,
            board: game.board(),
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Side::Human)
    }
}
