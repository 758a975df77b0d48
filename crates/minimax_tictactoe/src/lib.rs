//! Pure tic-tac-toe logic with a perfect-play engine.
//!
//! # Architecture
//!
//! - **Types**: board cells, sides and game status
//! - **Rules**: win and draw detection over the eight lines
//! - **Search**: exhaustive minimax with alpha-beta pruning
//! - **Game**: the turn/status state machine with one level of undo
//!
//! The crate performs no I/O. A transport layer owns a [`Game`], calls into
//! it with a cell index or a reset/undo request, and serialises the copies
//! it gets back.
//!
//! # Example
//!
//! ```
//! use minimax_tictactoe::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! let outcome = game.apply_human_move(4)?;
//! assert_eq!(*outcome.status(), GameStatus::Ongoing);
//! assert_eq!(*outcome.ai_move(), Some(0));
//! # Ok::<(), minimax_tictactoe::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod invariants;
pub mod rules;
pub mod search;
mod types;

pub use error::{GameError, GameErrorKind};
pub use game::{Game, MoveOutcome, ResetOutcome, Snapshot, UndoEntry};
pub use invariants::{
    CachedStatusInvariant, GameInvariants, Invariant, InvariantSet, InvariantViolation,
    MarkBalanceInvariant, SingleWinnerInvariant,
};
pub use search::{Searcher, best_move, evaluate};
pub use types::{Board, CELLS, Cell, GameStatus, ParseBoardError, Side};
