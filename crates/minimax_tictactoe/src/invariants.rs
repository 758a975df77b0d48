//! First-class invariants for the game state machine.
//!
//! Invariants are logical properties that must hold after every transition.
//! [`Game`] checks them in debug builds; tests check them directly.

use crate::game::Game;
use crate::rules::{classify, has_three_in_row};
use crate::types::{Cell, Side};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: mark counts differ by at most one, in the opener's favour.
pub struct MarkBalanceInvariant;

impl Invariant<Game> for MarkBalanceInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        let (opener, other) = match game.first() {
            Side::Human => (board.count(Cell::Human), board.count(Cell::Ai)),
            Side::Ai => (board.count(Cell::Ai), board.count(Cell::Human)),
        };
        opener == other || opener == other + 1
    }

    fn description() -> &'static str {
        "Opener has as many marks as the other side, or one more"
    }
}

/// Invariant: at most one side holds a line.
pub struct SingleWinnerInvariant;

impl Invariant<Game> for SingleWinnerInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        !(has_three_in_row(&board, Side::Human) && has_three_in_row(&board, Side::Ai))
    }

    fn description() -> &'static str {
        "Both sides cannot have three in a row"
    }
}

/// Invariant: the cached status matches the board.
pub struct CachedStatusInvariant;

impl Invariant<Game> for CachedStatusInvariant {
    fn holds(game: &Game) -> bool {
        game.status() == classify(&game.board())
    }

    fn description() -> &'static str {
        "Cached status matches the board"
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (
    MarkBalanceInvariant,
    SingleWinnerInvariant,
    CachedStatusInvariant,
);
