//! Tracing/logging setup shared by every binary and test harness.
//!
//! Filtering comes from `RUST_LOG` (default `info`); output is human-readable
//! unless `HBNB_LOG_FORMAT=json`.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "HBNB_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Anything other than `json` (case-insensitive) means pretty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LOG_FORMAT_ENV) {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Initialize tracing with the format from the environment.
pub fn init() {
    init_with(LogFormat::from_env());
}

/// Initialize tracing for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}
