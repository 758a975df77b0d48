//! Tic-tac-toe server library
//!
//! Serves a single game of tic-tac-toe over HTTP against an engine that
//! searches the full game tree with alpha-beta pruning.
//!
//! # Architecture
//!
//! - **Engine**: rules, search and the game state machine live in `minimax_tictactoe`
//! - **Session**: the one shared game, serialised behind an async mutex
//! - **Server**: axum routes translating requests into session calls
//! - **Config**: TOML file, environment and CLI layering
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_server::{AppState, ServerConfig, create_app};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?;
//! let app = create_app(Arc::new(AppState::new(*config.first())));
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod server;
mod session;

// Crate-level exports - HTTP payloads
pub use api::{
    ApiError, BoardResponse, ErrorResponse, HealthResponse, MoveRequest, MoveResponse,
    RESET_STATUS, ResetRequest, ResetResponse, UNDO_STATUS, UndoResponse,
};

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV, ConfigError, DEFAULT_CONFIG_FILE, ServerConfig};

// Crate-level exports - Server
pub use server::{AppState, create_app};

// Crate-level exports - Session management
pub use session::{GameSession, Rejection};
