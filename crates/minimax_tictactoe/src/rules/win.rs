//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Side};

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks whether `side` occupies all three cells of any line.
pub fn has_three_in_row(board: &Board, side: Side) -> bool {
    let mark = side.cell();
    let cells = board.cells();
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| cells[i] == mark))
}

/// Returns the side with three in a row, if any.
///
/// Under legal play at most one side can hold a line. The engine is
/// checked first to match terminal scoring in the search.
pub fn winner(board: &Board) -> Option<Side> {
    [Side::Ai, Side::Human]
        .into_iter()
        .find(|&side| has_three_in_row(board, side))
}
