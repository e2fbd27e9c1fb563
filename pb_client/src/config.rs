//! Bot configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use praetor_bot::{Policy, entities::{MatchId, PlayerId}};
use std::{fmt, path::PathBuf};

/// Match server endpoint used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "wss://praetorpoker.com/gameserver";

/// Log file used by `--log-to-file` when no path is given.
pub const DEFAULT_LOG_FILE: &str = "game_log.log";

/// Values given on the command line. These win over the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_to_file: bool,
    pub policy: Option<Policy>,
}

/// Complete bot configuration loaded from the CLI and environment variables
#[derive(Clone)]
pub struct BotConfig {
    /// Match to join
    pub match_id: MatchId,
    /// Seat assigned by the match server
    pub player_id: PlayerId,
    /// Public username
    pub username: String,
    /// Shared secret for signing outbound messages (required)
    pub secret: String,
    /// WebSocket URL of the match server
    pub server_url: String,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
    pub policy: Policy,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("match_id", &self.match_id)
            .field("player_id", &self.player_id)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("server_url", &self.server_url)
            .field("log_file", &self.log_file)
            .field("policy", &self.policy)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match to join (from CLI args)
    /// * `overrides` - Optional values from CLI args
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(match_id: MatchId, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let username = std::env::var("PRAETOR_USERNAME").map_err(|_| ConfigError::MissingRequired {
            var: "PRAETOR_USERNAME".to_string(),
            hint: "Set it to the username registered for this match".to_string(),
        })?;

        // Security configuration (REQUIRED)
        let secret = std::env::var("PRAETOR_SECRET").map_err(|_| ConfigError::MissingRequired {
            var: "PRAETOR_SECRET".to_string(),
            hint: "Use the secret issued with the match credentials".to_string(),
        })?;

        let player_id: PlayerId = match std::env::var("PRAETOR_PLAYER_ID") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                var: "PRAETOR_PLAYER_ID".to_string(),
                reason: format!("{v:?} is not a non-negative integer"),
            })?,
            Err(_) => 0,
        };

        let server_url = overrides
            .server_url
            .or_else(|| std::env::var("PRAETOR_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let log_file = overrides
            .log_file
            .or_else(|| std::env::var_os("PRAETOR_LOG_FILE").map(PathBuf::from))
            .or_else(|| overrides.log_to_file.then(|| PathBuf::from(DEFAULT_LOG_FILE)));

        let policy = match overrides.policy {
            Some(policy) => policy,
            None => match std::env::var("PRAETOR_POLICY") {
                Ok(v) => v.parse().map_err(|reason| ConfigError::Invalid {
                    var: "PRAETOR_POLICY".to_string(),
                    reason,
                })?,
                Err(_) => Policy::default(),
            },
        };

        Ok(BotConfig {
            match_id,
            player_id,
            username,
            secret,
            server_url,
            log_file,
            policy,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "PRAETOR_USERNAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "PRAETOR_SECRET".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ConfigError::Invalid {
                var: "PRAETOR_SERVER_URL".to_string(),
                reason: format!("{:?} must start with ws:// or wss://", self.server_url),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
