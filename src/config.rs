//! Server configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `TICTACTOE_*` environment variables, then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use minimax_tictactoe::Side;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "TICTACTOE_CONFIG";
/// Config file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Tracing filter used when `RUST_LOG` is unset.
    log_filter: String,

    /// Who opens the game created at startup.
    first: Side,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            log_filter: "info".to_string(),
            first: Side::Human,
        }
    }
}

impl ServerConfig {
    /// Parses configuration from TOML text. Missing keys keep their defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the config file and environment overrides.
    ///
    /// An explicit path (argument, then [`CONFIG_ENV`]) must exist; the
    /// default file is optional.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config = match named {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                debug!("No config file found, using built-in defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `TICTACTOE_HOST`, `TICTACTOE_PORT` and `TICTACTOE_FIRST`
    /// as returned by `lookup`.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("TICTACTOE_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("TICTACTOE_PORT") {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid TICTACTOE_PORT '{}': {}", port, e)))?;
        }
        if let Some(first) = lookup("TICTACTOE_FIRST") {
            self.first = first
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid TICTACTOE_FIRST '{}'", first)))?;
        }
        Ok(self)
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the opening side.
    pub fn with_first(mut self, first: Side) -> Self {
        self.first = first;
        self
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
