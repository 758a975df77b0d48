//! Command-line interface for tictactoe_server.

use clap::{Parser, Subcommand};
use minimax_tictactoe::{Board, Side};
use std::path::PathBuf;

/// Tic-tac-toe against a perfect minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "Single-session tic-tac-toe server with an unbeatable AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Who opens the first game: human or ai (overrides config)
        #[arg(long)]
        first: Option<Side>,
    },

    /// Print the engine's move for a board, e.g. "X.. .O. ..X"
    Solve {
        /// Nine cells: X, O, or . for empty
        board: Board,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimax_tictactoe::Cell;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from(["tictactoe_server", "serve", "--port", "9000", "--first", "ai"])
            .unwrap();
        match cli.command {
            Command::Serve {
                config,
                host,
                port,
                first,
            } => {
                assert!(config.is_none());
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
                assert_eq!(first, Some(Side::Ai));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_solve_board() {
        let cli = Cli::try_parse_from(["tictactoe_server", "solve", "XX..O...."]).unwrap();
        match cli.command {
            Command::Solve { board } => {
                assert_eq!(board.get(0), Some(Cell::Human));
                assert_eq!(board.get(4), Some(Cell::Ai));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_board() {
        assert!(Cli::try_parse_from(["tictactoe_server", "solve", "XXO"]).is_err());
    }
}
