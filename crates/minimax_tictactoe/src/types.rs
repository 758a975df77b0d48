//! Core domain types for tic-tac-toe.

use crate::error::{GameError, GameErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// One side of the game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Side {
    /// The human player, marked `X`.
    #[default]
    Human,
    /// The engine, marked `O`.
    Ai,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    /// Returns the mark this side places.
    pub fn cell(self) -> Cell {
        match self {
            Side::Human => Cell::Human,
            Side::Ai => Cell::Ai,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Unoccupied.
    #[default]
    #[serde(rename = "")]
    Empty,
    /// Occupied by the human.
    #[serde(rename = "X")]
    Human,
    /// Occupied by the engine.
    #[serde(rename = "O")]
    Ai,
}

impl Cell {
    /// Returns the display symbol for the cell.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Ai => 'O',
        }
    }
}

/// 3x3 board, row-major, indices 0-8.
///
/// The board is `Copy`: snapshots stored for undo or handed to callers are
/// always independent of the live board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given position, `None` when out of range.
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: usize, cell: Cell) -> Result<(), GameError> {
        let slot = self
            .cells
            .get_mut(pos)
            .ok_or_else(|| GameError::new(GameErrorKind::InvalidMove { position: pos }))?;
        *slot = cell;
        Ok(())
    }

    /// Checks if the position is on the board and unoccupied.
    pub fn is_empty_at(&self, pos: usize) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Checks if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Empty positions in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// Number of cells holding the given value.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    // Search-internal access; callers guarantee `pos < CELLS`.
    pub(crate) fn put(&mut self, pos: usize, cell: Cell) -> Cell {
        std::mem::replace(&mut self.cells[pos], cell)
    }
}

impl From<[Cell; CELLS]> for Board {
    fn from(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
            let [a, b, c] = [chunk[0], chunk[1], chunk[2]].map(Cell::symbol);
            write!(f, "{a}|{b}|{c}")?;
        }
        Ok(())
    }
}

/// Error parsing a board string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Invalid board string: {}", message)]
pub struct ParseBoardError {
    /// Error message.
    pub message: String,
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cells written as `X`, `O`, and `.`, `-`, `_` or a digit
    /// for empty. Whitespace and `|` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; CELLS];
        let mut n = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let cell = match ch {
                'X' | 'x' => Cell::Human,
                'O' | 'o' => Cell::Ai,
                '.' | '-' | '_' => Cell::Empty,
                c if c.is_ascii_digit() => Cell::Empty,
                other => {
                    return Err(ParseBoardError {
                        message: format!("unexpected character '{other}'"),
                    });
                }
            };
            if n == CELLS {
                return Err(ParseBoardError {
                    message: "more than 9 cells".to_string(),
                });
            }
            cells[n] = cell;
            n += 1;
        }
        if n != CELLS {
            return Err(ParseBoardError {
                message: format!("expected 9 cells, found {n}"),
            });
        }
        Ok(Self { cells })
    }
}

/// Current status of the game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    Ongoing,
    /// The human completed a line.
    HumanWin,
    /// The engine completed a line.
    AiWin,
    /// Board full with no line.
    Draw,
}

impl GameStatus {
    /// True for win and draw states.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// The winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::HumanWin => Some(Side::Human),
            GameStatus::AiWin => Some(Side::Ai),
            GameStatus::Ongoing | GameStatus::Draw => None,
        }
    }
}
