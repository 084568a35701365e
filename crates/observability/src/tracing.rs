//! Tracing/logging initialization.
//!
//! Output goes to stderr so it never interleaves with what a front end prints
//! on stdout.

use core::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_VAR: &str = "BARISTAMATIC_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("BARISTAMATIC_LOG_FORMAT must be json or pretty, got {0:?}")]
pub struct LogFormatError(pub String);

impl FromStr for LogFormat {
    type Err = LogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogFormatError(s.to_string())),
        }
    }
}

impl LogFormat {
    /// Read the format from `BARISTAMATIC_LOG_FORMAT` (unset = pretty).
    pub fn from_env() -> Result<Self, LogFormatError> {
        match std::env::var(LOG_FORMAT_VAR) {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(LogFormat::default()),
        }
    }
}

/// Initialize tracing/logging for the process, filtered by `RUST_LOG`
/// (default `info`).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    };
}
