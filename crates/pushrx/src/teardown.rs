#![forbid(unsafe_code)]

//! Cleanup action handed back by a producer.

/// A zero-argument cleanup action, run at most once.
///
/// Consumed by [`run`](Teardown::run), so the type itself rules out a
/// second invocation.
#[derive(Default)]
pub struct Teardown(Option<Box<dyn FnOnce()>>);

impl Teardown {
    /// Wrap a cleanup action.
    #[must_use]
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(f)))
    }

    /// A teardown that does nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }

    /// Whether there is no action to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Run the action, if any.
    pub fn run(self) {
        if let Some(f) = self.0 {
            f();
        }
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("empty", &self.is_empty())
            .finish()
    }
}
