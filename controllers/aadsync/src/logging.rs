//! Logging setup.
//!
//! The `--loglevel` flag sets the default filter directive; `RUST_LOG`
//! refines it.

use std::fmt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log verbosity accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Debug and above
    Debug,
    /// Info and above
    #[default]
    Info,
    /// Warnings and errors
    Warning,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Parse a level name case-insensitively; unknown names fall back to `Info`
    pub fn sanitize(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        };
        f.write_str(name)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// clap value parser that never rejects a level
#[allow(clippy::unnecessary_wraps, reason = "clap value parsers must return a Result")]
pub fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    Ok(LogLevel::sanitize(value))
}

/// Install the global fmt subscriber
pub fn init(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
