//! Logger setup for the bot binary.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::{fs::OpenOptions, path::Path};

/// Level used when `RUST_LOG` isn't set.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize `env_logger`, writing to stderr or appending to `log_file`.
///
/// Configurable log levels via the RUST_LOG env var.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format_target(false);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}
