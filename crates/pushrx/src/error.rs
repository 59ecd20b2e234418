#![forbid(unsafe_code)]

//! Errors surfaced by [`Observable::subscribe`](crate::Observable::subscribe).
//!
//! Application-level failures travel through the error channel of the
//! stream itself ([`Observer::error`](crate::Observer::error)); only faults
//! that stop a producer before it hands back its teardown end up here.

/// A subscription could not be established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    /// The producer failed during its synchronous run.
    ProducerFailed {
        /// Label of the observable, if it has one.
        label: Option<String>,
        /// Producer-supplied reason.
        reason: String,
    },
}

impl SubscribeError {
    /// Build a producer failure. The observable label is filled in by
    /// `subscribe`.
    #[must_use]
    pub fn producer(reason: impl Into<String>) -> Self {
        Self::ProducerFailed {
            label: None,
            reason: reason.into(),
        }
    }

    /// Attach the label of the observable that failed, keeping any label
    /// already present.
    #[must_use]
    pub(crate) fn with_label(self, observable: Option<&str>) -> Self {
        match self {
            Self::ProducerFailed { label, reason } => Self::ProducerFailed {
                label: label.or_else(|| observable.map(str::to_owned)),
                reason,
            },
        }
    }

    /// The producer-supplied reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::ProducerFailed { reason, .. } => reason,
        }
    }
}

impl std::fmt::Display for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProducerFailed {
                label: Some(label),
                reason,
            } => write!(f, "producer for `{label}` failed: {reason}"),
            Self::ProducerFailed {
                label: None,
                reason,
            } => write!(f, "producer failed: {reason}"),
        }
    }
}

impl std::error::Error for SubscribeError {}
