//! Game rules for tic-tac-toe.
//!
//! Pure functions that classify a board. Rules are kept apart from board
//! storage so the search engine and the game state machine share them.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{LINES, has_three_in_row, winner};

use crate::types::{Board, GameStatus, Side};
use tracing::instrument;

/// Classifies a board as won, drawn or ongoing.
///
/// Wins are checked before fullness since a full board can also be a win.
#[instrument(level = "trace", ret)]
pub fn classify(board: &Board) -> GameStatus {
    if has_three_in_row(board, Side::Ai) {
        GameStatus::AiWin
    } else if has_three_in_row(board, Side::Human) {
        GameStatus::HumanWin
    } else if is_draw(board) {
        GameStatus::Draw
    } else {
        GameStatus::Ongoing
    }
}
