//! Minimax search with alpha-beta pruning.
//!
//! The engine plays [`Side::Ai`] and maximises; the human minimises. Scores
//! are exact game-theoretic values: the tree is small enough (at most 9!
//! leaves) to search to the end without a depth limit or transposition table.

use crate::rules::{has_three_in_row, is_draw};
use crate::types::{Board, CELLS, Cell, Side};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Score of a board the engine has won.
pub const AI_WIN: i32 = 1;
/// Score of a board the human has won.
pub const HUMAN_WIN: i32 = -1;
/// Score of a drawn board.
pub const DRAW: i32 = 0;

/// Lower bound of the initial search window.
pub const NEG_INF: i32 = i32::MIN;
/// Upper bound of the initial search window.
pub const POS_INF: i32 = i32::MAX;

/// A trial move that is undone when the guard drops.
///
/// Every cell the search writes is restored on scope exit, so no mutation
/// escapes a recursive call even on early `break`.
struct TrialMove<'a> {
    board: &'a mut Board,
    pos: usize,
    previous: Cell,
}

impl<'a> TrialMove<'a> {
    fn place(board: &'a mut Board, pos: usize, side: Side) -> Self {
        let previous = board.put(pos, side.cell());
        Self {
            board,
            pos,
            previous,
        }
    }
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.put(self.pos, self.previous);
    }
}

/// Score for a finished board, `None` while play continues.
fn terminal_score(board: &Board) -> Option<i32> {
    if has_three_in_row(board, Side::Ai) {
        Some(AI_WIN)
    } else if has_three_in_row(board, Side::Human) {
        Some(HUMAN_WIN)
    } else if is_draw(board) {
        Some(DRAW)
    } else {
        None
    }
}

/// Alpha-beta searcher that counts visited nodes.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher with a zero node count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited since creation.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores `board` with `to_move` on turn.
    ///
    /// Returns [`AI_WIN`], [`HUMAN_WIN`] or [`DRAW`] under optimal play from
    /// both sides. `alpha` and `beta` bound the window; pass [`NEG_INF`] and
    /// [`POS_INF`] for an exact score.
    pub fn evaluate(&mut self, board: &Board, to_move: Side, alpha: i32, beta: i32) -> i32 {
        let mut scratch = *board;
        self.search(&mut scratch, to_move, alpha, beta)
    }

    /// Picks the engine's move and its score.
    ///
    /// Empty cells are tried in ascending order and only a strictly greater
    /// score replaces the incumbent, so ties go to the lowest index.
    pub fn best_move_scored(&mut self, board: &Board) -> Option<(usize, i32)> {
        let mut scratch = *board;
        let mut best: Option<(usize, i32)> = None;

        for pos in 0..CELLS {
            if !scratch.is_empty_at(pos) {
                continue;
            }
            let score = {
                let mut trial = TrialMove::place(&mut scratch, pos, Side::Ai);
                self.search(&mut trial, Side::Human, NEG_INF, POS_INF)
            };
            if best.is_none_or(|(_, incumbent)| score > incumbent) {
                best = Some((pos, score));
            }
        }

        best
    }

    /// Picks the engine's move, `None` on a full board.
    pub fn best_move(&mut self, board: &Board) -> Option<usize> {
        self.best_move_scored(board).map(|(pos, _)| pos)
    }

    fn search(&mut self, board: &mut Board, to_move: Side, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(board) {
            return score;
        }

        match to_move {
            Side::Ai => {
                let mut best = NEG_INF;
                for pos in 0..CELLS {
                    if !board.is_empty_at(pos) {
                        continue;
                    }
                    let score = {
                        let mut trial = TrialMove::place(board, pos, Side::Ai);
                        self.search(&mut trial, Side::Human, alpha, beta)
                    };
                    best = best.max(score);
                    alpha = alpha.max(best);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
            Side::Human => {
                let mut best = POS_INF;
                for pos in 0..CELLS {
                    if !board.is_empty_at(pos) {
                        continue;
                    }
                    let score = {
                        let mut trial = TrialMove::place(board, pos, Side::Human);
                        self.search(&mut trial, Side::Ai, alpha, beta)
                    };
                    best = best.min(score);
                    beta = beta.min(best);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
        }
    }
}

/// Scores `board` with `to_move` on turn. See [`Searcher::evaluate`].
pub fn evaluate(board: &Board, to_move: Side, alpha: i32, beta: i32) -> i32 {
    Searcher::new().evaluate(board, to_move, alpha, beta)
}

/// Picks the engine's optimal move, `None` on a full board.
#[instrument(level = "debug", skip_all)]
pub fn best_move(board: &Board) -> Option<usize> {
    let mut searcher = Searcher::new();
    let choice = searcher.best_move(board);
    debug!(position = ?choice, nodes = searcher.nodes(), "Search complete");
    choice
}
