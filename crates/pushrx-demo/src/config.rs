#![forbid(unsafe_code)]

//! Logging configuration read from the environment.
//!
//! | Variable          | Effect                                   |
//! |-------------------|------------------------------------------|
//! | `PUSHRX_LOG`      | `EnvFilter` directive (falls back to `RUST_LOG`) |
//! | `PUSHRX_LOG_JSON` | JSON output when set to `1/true/yes/on`  |

use std::env;

/// Filter directive variable.
pub const LOG_ENV: &str = "PUSHRX_LOG";
/// JSON output flag variable.
pub const LOG_JSON_ENV: &str = "PUSHRX_LOG_JSON";

const DEFAULT_FILTER: &str = "info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Configuration for the demo's tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `pushrx=trace`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Read the configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `get_env`.
    pub fn from_lookup<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = get_env(LOG_ENV)
            .or_else(|| get_env("RUST_LOG"))
            .filter(|val| !val.trim().is_empty())
        {
            config.filter = filter.trim().to_string();
        }
        if let Some(val) = get_env(LOG_JSON_ENV)
            && env_flag(&val)
        {
            config.format = LogFormat::Json;
        }
        config
    }

    /// Set the filter directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
