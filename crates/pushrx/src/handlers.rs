#![forbid(unsafe_code)]

//! The subscriber's capability record.
//!
//! Every field is optional. A missing handler turns the matching event into
//! a no-op; that rule lives in [`Observer`](crate::Observer) dispatch, so
//! callers never check presence themselves.

type NextFn<T> = Box<dyn FnMut(T)>;
type ErrorFn<E> = Box<dyn FnOnce(E)>;
type CompleteFn = Box<dyn FnOnce()>;

/// Callbacks for the three stream events.
///
/// `error` and `complete` are `FnOnce`: a subscription delivers at most one
/// terminal event.
pub struct Handlers<T, E> {
    pub(crate) next: Option<NextFn<T>>,
    pub(crate) error: Option<ErrorFn<E>>,
    pub(crate) complete: Option<CompleteFn>,
}

// Manual Default: no `T: Default` / `E: Default` bound.
impl<T, E> Default for Handlers<T, E> {
    fn default() -> Self {
        Self {
            next: None,
            error: None,
            complete: None,
        }
    }
}

impl<T, E> std::fmt::Debug for Handlers<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("next", &self.next.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

impl<T, E> Handlers<T, E> {
    /// An empty record: every event is ignored.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler for each pushed value.
    #[must_use]
    pub fn on_next(mut self, f: impl FnMut(T) + 'static) -> Self {
        self.next = Some(Box::new(f));
        self
    }

    /// Set the handler for the terminal error.
    #[must_use]
    pub fn on_error(mut self, f: impl FnOnce(E) + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    /// Set the handler for normal completion.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    /// Whether no handler is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.error.is_none() && self.complete.is_none()
    }
}
