//! Tic-tac-toe server - CLI entry point
//!
//! Runs the HTTP game server or solves a single position.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use minimax_tictactoe::{Board, GameStatus, Searcher, Side, rules};
use std::path::PathBuf;
use std::sync::Arc;
use tictactoe_server::{AppState, ServerConfig, create_app};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            first,
        } => run_server(config, host, port, first).await,
        Command::Solve { board } => solve(board),
    }
}

/// Run the HTTP game server
async fn run_server(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    first: Option<Side>,
) -> Result<()> {
    let mut config = ServerConfig::load(config.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(first) = first {
        config = config.with_first(first);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    info!(?config, "Starting tic-tac-toe server");

    let state = Arc::new(AppState::new(*config.first()));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Server ready at http://{}/", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

/// Print the engine's reply for a position, with the AI to move.
#[instrument(skip_all)]
fn solve(board: Board) -> Result<()> {
    println!("{}\n", board);

    let status = rules::classify(&board);
    if status != GameStatus::Ongoing {
        println!("Game already decided: {}", status);
        return Ok(());
    }

    let mut searcher = Searcher::new();
    match searcher.best_move_scored(&board) {
        Some((position, score)) => {
            let verdict = match score.signum() {
                1 => "AI wins",
                -1 => "human wins",
                _ => "draw",
            };
            println!(
                "Best move: {} (score {}, {} with best play, {} nodes searched)",
                position,
                score,
                verdict,
                searcher.nodes()
            );
        }
        None => println!("No moves available"),
    }
    Ok(())
}
