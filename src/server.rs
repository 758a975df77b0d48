//! HTTP routes and handlers.
//!
//! Endpoints:
//! - GET  /        - Browser front end
//! - GET  /board   - Current board and status
//! - POST /move    - Human move plus the engine's reply
//! - POST /reset   - New game, optionally opened by the engine
//! - POST /undo    - Revert the last exchange
//! - GET  /health  - Health check

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{State, rejection::JsonRejection},
    http::{Request, StatusCode},
    response::Html,
    routing::{get, post},
};
use minimax_tictactoe::Side;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

use crate::api::{
    ApiError, BoardResponse, HealthResponse, MoveRequest, MoveResponse, RESET_STATUS,
    ResetRequest, ResetResponse, UNDO_STATUS, UndoResponse,
};
use crate::session::GameSession;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// The single game every request acts on.
    pub session: GameSession,
}

impl AppState {
    /// Creates state whose first game is opened by `first`.
    pub fn new(first: Side) -> Self {
        Self {
            session: GameSession::new(first),
        }
    }
}

/// Create the application router with the given state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/board", get(get_board))
        .route("/move", post(make_move))
        .route("/reset", post(reset_game))
        .route("/undo", post(undo_move))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Serve the browser front end.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Get the current board.
pub async fn get_board(State(state): State<Arc<AppState>>) -> Json<BoardResponse> {
    Json(state.session.snapshot().await.into())
}

/// Make a human move; the engine replies unless the game ended.
#[instrument(skip_all)]
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            warn!(error = %e.body_text(), "Malformed move request");
            let board = *state.session.snapshot().await.board();
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid move request: {}", e.body_text()),
                board,
            ));
        }
    };

    let outcome = state.session.play(req.position).await.map_err(|rejection| {
        warn!(error = %rejection, "Move rejected");
        ApiError::from(rejection)
    })?;
    Ok(Json(outcome.into()))
}

/// Start a new game. An empty body means the human goes first.
#[instrument(skip_all)]
pub async fn reset_game(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ResetResponse>, ApiError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        ResetRequest::default()
    } else {
        match serde_json::from_slice::<ResetRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Malformed reset request");
                let board = *state.session.snapshot().await.board();
                return Err(ApiError::new(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid reset request: {}", e),
                    board,
                ));
            }
        }
    };

    let outcome = state.session.reset(req.first).await;
    debug!(first = %outcome.first(), "Reset complete");
    Ok(Json(ResetResponse {
        board: *outcome.board(),
        status: RESET_STATUS.to_string(),
        first: *outcome.first(),
    }))
}

/// Undo the last human move and the engine's reply.
#[instrument(skip(state))]
pub async fn undo_move(State(state): State<Arc<AppState>>) -> Result<Json<UndoResponse>, ApiError> {
    let board = state.session.undo().await.map_err(|rejection| {
        warn!(error = %rejection, "Undo rejected");
        ApiError::from(rejection)
    })?;
    Ok(Json(UndoResponse {
        board,
        status: UNDO_STATUS.to_string(),
    }))
}

/// Health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
