#![forbid(unsafe_code)]

//! Demo error type.

use pushrx::SubscribeError;

/// Errors from running the demo.
#[derive(Debug)]
pub enum DemoError {
    /// The request stream could not be subscribed to.
    Subscribe(SubscribeError),
    /// The global tracing subscriber could not be installed.
    Logging(String),
    /// A payload or report could not be rendered as JSON.
    Serialize(serde_json::Error),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subscribe(err) => write!(f, "subscribe failed: {err}"),
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
            Self::Serialize(err) => write!(f, "json output failed: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Subscribe(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<SubscribeError> for DemoError {
    fn from(err: SubscribeError) -> Self {
        Self::Subscribe(err)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn subscribe_error_converts_and_chains() {
        let err: DemoError = SubscribeError::producer("offline").into();
        assert_eq!(err.to_string(), "subscribe failed: producer failed: offline");
        assert!(err.source().is_some());
    }

    #[test]
    fn logging_error_has_no_source() {
        let err = DemoError::Logging("already set".into());
        assert_eq!(err.to_string(), "logging setup failed: already set");
        assert!(err.source().is_none());
    }
}
