//! CLI runner for common setup.
//!
//! Loads the config file and initializes logging before a command runs.

use tracing::debug;
use geogrid::config::ConfigFile;
use geogrid::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// Each `--verbose` raises the configured level by one step.
    pub fn new(verbose: u8) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let level = effective_level(&config.logging.level, verbose);
        let logging_guard = init_logging(level, config.logging.file.as_deref())
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        debug!(version = geogrid::VERSION, level, "GeoGrid CLI started");

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }
}

/// Level after applying `verbose` steps towards `trace`.
fn effective_level(configured: &str, verbose: u8) -> &str {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

    if verbose == 0 {
        return configured;
    }
    let base = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(configured))
        .unwrap_or(1);
    let raised = (base + verbose as usize).min(LEVELS.len() - 1);
    LEVELS[raised]
}
