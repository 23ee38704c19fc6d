//! Structured logging for the campus navigation service. The output format
//! is set by LOG_FORMAT (json or text, json by default) and the level filter
//! by RUST_LOG (info by default)

use std::str::FromStr;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Format of the log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON lines, used by default
    #[default]
    Json,
    /// Human readable text, for local development
    Text,
}

impl FromStr for LogFormat {
    type Err = ();

    /// Accepts "json", "text", or "pretty" (alias for text)
    fn from_str(input: &str) -> Result<LogFormat, Self::Err> {
        match input.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            _ => Err(()),
        }
    }
}

/// Settings for the global tracing subscriber
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive, such as "info" or "campus_nav=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration using the provided variable lookup. Unknown
    /// formats fall back to JSON
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = lookup("LOG_FORMAT")
            .and_then(|value| LogFormat::from_str(&value).ok())
            .unwrap_or_default();
        let level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Self { format, level }
    }
}

/// Install the global tracing subscriber. Calling this more than once is
/// harmless, later calls leave the first subscriber in place
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
