#![forbid(unsafe_code)]

//! Global tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};
use crate::error::DemoError;

/// Install a global `fmt` subscriber writing to stderr.
///
/// Fails if the filter directive does not parse or a global subscriber is
/// already installed.
pub fn init(config: &LogConfig) -> Result<(), DemoError> {
    let filter =
        EnvFilter::try_new(&config.filter).map_err(|err| DemoError::Logging(err.to_string()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| DemoError::Logging(err.to_string()))
}
