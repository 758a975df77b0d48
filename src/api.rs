//! Request and response types for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use minimax_tictactoe::{Board, GameErrorKind, GameStatus, MoveOutcome, Side, Snapshot};
use serde::{Deserialize, Serialize};

use crate::session::Rejection;

/// Status tag returned by a successful reset.
pub const RESET_STATUS: &str = "reset";
/// Status tag returned by a successful undo.
pub const UNDO_STATUS: &str = "undo_success";

/// Request to make a move.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// Cell index, 0-8 row-major.
    pub position: usize,
}

/// Request to start a new game.
#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    /// Who plays first: "human" or "ai".
    #[serde(default)]
    pub first: Side,
}

/// Current board for rendering.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardResponse {
    /// Cells as `""`, `"X"` or `"O"`.
    pub board: Board,
    /// Game status.
    pub status: GameStatus,
    /// Whether `/undo` would succeed.
    pub can_undo: bool,
}

impl From<Snapshot> for BoardResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            board: *snapshot.board(),
            status: *snapshot.status(),
            can_undo: *snapshot.can_undo(),
        }
    }
}

/// Response after a move.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Board after the human move and the engine's reply.
    pub board: Board,
    /// `ongoing`, `human_win`, `ai_win` or `draw`.
    pub status: GameStatus,
    /// Where the engine replied, if it did.
    pub ai_move: Option<usize>,
}

impl From<MoveOutcome> for MoveResponse {
    fn from(outcome: MoveOutcome) -> Self {
        Self {
            board: *outcome.board(),
            status: *outcome.status(),
            ai_move: *outcome.ai_move(),
        }
    }
}

/// Response after a reset.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Fresh board, holding the engine's opening if it went first.
    pub board: Board,
    /// Always `"reset"`.
    pub status: String,
    /// Who opened.
    pub first: Side,
}

/// Response after an undo.
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResponse {
    /// Restored board.
    pub board: Board,
    /// Always `"undo_success"`.
    pub status: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Error body: message plus the unchanged board.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
    /// Current board.
    pub board: Board,
}

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: impl Into<String>, board: Board) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                board,
            },
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        let status = match rejection.error.kind() {
            GameErrorKind::InvalidMove { .. } => StatusCode::BAD_REQUEST,
            GameErrorKind::GameOver | GameErrorKind::NothingToUndo => StatusCode::CONFLICT,
        };
        Self::new(status, rejection.to_string(), rejection.board)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimax_tictactoe::GameError;

    #[test]
    fn test_rejection_status_codes() {
        let reject = |kind| Rejection {
            error: GameError::new(kind),
            board: Board::new(),
        };
        assert_eq!(
            ApiError::from(reject(GameErrorKind::InvalidMove { position: 3 })).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(reject(GameErrorKind::GameOver)).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(reject(GameErrorKind::NothingToUndo)).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_reset_request_defaults_to_human() {
        let req: ResetRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.first, Side::Human);
        let req: ResetRequest = serde_json::from_str(r#"{"first":"ai"}"#).unwrap();
        assert_eq!(req.first, Side::Ai);
    }
}
