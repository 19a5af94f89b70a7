//! Logging setup shared by the Feedcast tools
//!
//! All output goes to stderr so that stdout stays clean for feed data.
//! The format and level come from the command line or from
//! `FEEDCAST_LOG_FORMAT` / `FEEDCAST_LOG_LEVEL`; `RUST_LOG` wins over both.
//!
//! ```no_run
//! use libfeedcast::logging::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::new(LogFormat::Json, "debug").init();
//!
//! // or, inside a binary with a --verbose flag
//! LoggingConfig::from_env(false).init();
//! ```

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Level used by the command line tools when nothing else is configured
pub const DEFAULT_LEVEL: &str = "error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text without target or colors
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line, colored, for development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: impl Into<String>) -> Self {
        Self {
            format,
            level: level.into(),
        }
    }

    /// Build a configuration from the `FEEDCAST_LOG_*` variables
    ///
    /// `verbose` forces the `debug` level regardless of `FEEDCAST_LOG_LEVEL`.
    pub fn from_env(verbose: bool) -> Self {
        let format = std::env::var("FEEDCAST_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogFormat::Text);

        let level = if verbose {
            "debug".to_string()
        } else {
            std::env::var("FEEDCAST_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LEVEL.to_string())
        };

        Self::new(format, level)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber
    ///
    /// Returns `false` if a subscriber was already installed, which happens
    /// when several tests in one process initialise logging.
    pub fn init(&self) -> bool {
        let filter = self.filter();

        let result = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false)
                .try_init(),
        };

        result.is_ok()
    }
}
