#![forbid(unsafe_code)]

//! Guarded handler set with at-most-once termination.
//!
//! # Design
//!
//! [`Observer<T, E>`] wraps a subscriber's [`Handlers`] in shared,
//! reference-counted storage (`Rc<RefCell<..>>`). The producer and the
//! [`Subscription`](crate::Subscription) each hold a handle to the same
//! state, so an `unsubscribe()` from the consumer is seen by the producer
//! immediately.
//!
//! ```text
//!            next(v)               error(e) / complete()
//!   Active ──────────► Active     Active ──────────────────► Terminated
//!                                 Active ── unsubscribe() ─► Terminated
//!   Terminated ── any event ──► Terminated   (dropped silently)
//! ```
//!
//! # Invariants
//!
//! 1. Terminated is absorbing: no event leaves it.
//! 2. No handler runs after termination.
//! 3. The attached teardown runs at most once, and only once terminated.
//! 4. Handlers are released on termination.
//!
//! # Failure Modes
//!
//! - **Re-entrant `next`**: a value pushed from inside the `next` handler is
//!   queued and delivered after the current call returns, in push order.
//!   Queued values still pending when the observer terminates are dropped.
//! - **Re-entrant termination**: handlers never run while the internal
//!   borrow is held, so calling `unsubscribe()`, `error()` or `complete()`
//!   from inside a handler is allowed and takes effect immediately.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::handlers::Handlers;
use crate::teardown::Teardown;

/// Why an Observer terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The producer called `complete()`.
    Completed,
    /// The producer called `error()`.
    Errored,
    /// The consumer called `unsubscribe()`.
    Unsubscribed,
}

/// Lifecycle state of an [`Observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObserverState {
    /// Events are delivered.
    #[default]
    Active,
    /// Events are dropped. Carries the first cause of termination.
    Terminated(Termination),
}

impl ObserverState {
    /// Whether the observer has terminated.
    #[must_use]
    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated(_))
    }
}

/// Shared interior for [`Observer<T, E>`].
struct ObserverInner<T, E> {
    handlers: Handlers<T, E>,
    state: ObserverState,
    teardown: Option<Teardown>,
    /// Values handed to the `next` handler so far.
    delivered: u64,
    /// The `next` handler is checked out and running.
    dispatching: bool,
    /// Values pushed re-entrantly while `dispatching`.
    pending: VecDeque<T>,
}

/// The guard around a subscriber's handlers.
///
/// Cloning an `Observer` creates a new handle to the **same** state.
pub struct Observer<T, E> {
    inner: Rc<RefCell<ObserverInner<T, E>>>,
}

// Manual Clone: shares the same Rc.
impl<T, E> Clone for Observer<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, E> std::fmt::Debug for Observer<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observer")
            .field("state", &inner.state)
            .field("delivered", &inner.delivered)
            .field("handlers", &inner.handlers)
            .field("teardown_pending", &inner.teardown.is_some())
            .finish()
    }
}

impl<T, E> Observer<T, E> {
    /// Wrap a handler set. The observer starts Active with no teardown.
    #[must_use]
    pub fn new(handlers: Handlers<T, E>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObserverInner {
                handlers,
                state: ObserverState::Active,
                teardown: None,
                delivered: 0,
                dispatching: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Deliver a value to the `next` handler. Dropped once terminated.
    pub fn next(&self, value: T) {
        let handler = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_terminated() {
                trace!("next after termination dropped");
                return;
            }
            if inner.dispatching {
                inner.pending.push_back(value);
                trace!(pending = inner.pending.len(), "re-entrant next queued");
                return;
            }
            let Some(handler) = inner.handlers.next.take() else {
                return;
            };
            inner.dispatching = true;
            inner.delivered += 1;
            trace!(delivered = inner.delivered, "next");
            handler
        };

        let mut handler = handler;
        let mut value = value;
        loop {
            handler(value);

            let mut inner = self.inner.borrow_mut();
            if inner.state.is_terminated() {
                inner.dispatching = false;
                let dropped = mem::take(&mut inner.pending);
                // `dropped` and `handler` are released after the borrow.
                drop(inner);
                drop(dropped);
                return;
            }
            if let Some(queued) = inner.pending.pop_front() {
                inner.delivered += 1;
                trace!(delivered = inner.delivered, "next (queued)");
                value = queued;
            } else {
                inner.dispatching = false;
                inner.handlers.next = Some(handler);
                return;
            }
        }
    }

    /// Deliver the terminal error, then tear down.
    pub fn error(&self, err: E) {
        let Some(handler) = self.terminate(Termination::Errored, |h| h.error.take()) else {
            return;
        };
        if let Some(handler) = handler {
            handler(err);
        }
        self.release();
    }

    /// Deliver completion, then tear down.
    pub fn complete(&self) {
        let Some(handler) = self.terminate(Termination::Completed, |h| h.complete.take()) else {
            return;
        };
        if let Some(handler) = handler {
            handler();
        }
        self.release();
    }

    /// Terminate and run the teardown if one is still attached.
    ///
    /// Idempotent: repeated calls keep the first termination cause and never
    /// run the teardown twice.
    pub fn unsubscribe(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.is_terminated() {
                inner.state = ObserverState::Terminated(Termination::Unsubscribed);
                debug!(delivered = inner.delivered, "observer unsubscribed");
            }
        }
        self.release();
    }

    /// Whether the observer has terminated.
    #[must_use]
    pub fn is_unsubscribed(&self) -> bool {
        self.inner.borrow().state.is_terminated()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ObserverState {
        self.inner.borrow().state
    }

    /// Number of values delivered to the `next` handler.
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.inner.borrow().delivered
    }

    /// Hand the producer's teardown to this observer.
    ///
    /// If the observer already terminated (the producer finished
    /// synchronously), the teardown runs immediately.
    pub(crate) fn attach_teardown(&self, teardown: Teardown) {
        let run_now = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_terminated() {
                Some(teardown)
            } else {
                inner.teardown = Some(teardown);
                None
            }
        };
        if let Some(teardown) = run_now {
            debug!("teardown attached after termination, running now");
            teardown.run();
        }
    }

    /// Move to Terminated with `cause` and take one terminal handler out.
    ///
    /// Returns `None` if the observer was already terminated, otherwise the
    /// (possibly absent) handler.
    fn terminate<H>(
        &self,
        cause: Termination,
        take: impl FnOnce(&mut Handlers<T, E>) -> Option<H>,
    ) -> Option<Option<H>> {
        let mut inner = self.inner.borrow_mut();
        if inner.state.is_terminated() {
            trace!(?cause, "terminal event after termination dropped");
            return None;
        }
        inner.state = ObserverState::Terminated(cause);
        debug!(?cause, delivered = inner.delivered, "observer terminated");
        Some(take(&mut inner.handlers))
    }

    /// Drop the remaining handlers and run the teardown, both outside the
    /// borrow.
    fn release(&self) {
        let (handlers, teardown) = {
            let mut inner = self.inner.borrow_mut();
            (mem::take(&mut inner.handlers), inner.teardown.take())
        };
        drop(handlers);
        if let Some(teardown) = teardown {
            debug!("running teardown");
            teardown.run();
        }
    }
}
