//! Draw detection logic for tic-tac-toe.

use crate::types::Board;

/// Checks if the board is full (all squares occupied).
///
/// Does not look for a winner: a full board can also be a win, so callers
/// check [`super::has_three_in_row`] first.
pub fn is_draw(board: &Board) -> bool {
    board.is_full()
}
