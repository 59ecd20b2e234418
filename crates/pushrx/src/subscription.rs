#![forbid(unsafe_code)]

//! Handle returned from [`Observable::subscribe`](crate::Observable::subscribe).

use crate::observer::Observer;

/// Type-erased view of an [`Observer`], so `Subscription` does not carry the
/// value and error type parameters.
trait Unsubscribe {
    fn unsubscribe(&self);
    fn is_closed(&self) -> bool;
}

impl<T, E> Unsubscribe for Observer<T, E> {
    fn unsubscribe(&self) {
        Observer::unsubscribe(self);
    }

    fn is_closed(&self) -> bool {
        self.is_unsubscribed()
    }
}

/// Capability to end a subscription.
///
/// Dropping a `Subscription` does **not** unsubscribe: a synchronous
/// producer has usually finished by the time the handle exists, and the
/// teardown of a still-running producer is only released by an explicit
/// [`unsubscribe`](Subscription::unsubscribe).
pub struct Subscription {
    observer: Box<dyn Unsubscribe>,
}

impl Subscription {
    pub(crate) fn new<T: 'static, E: 'static>(observer: Observer<T, E>) -> Self {
        Self {
            observer: Box::new(observer),
        }
    }

    /// End the subscription. Idempotent; the teardown runs at most once.
    pub fn unsubscribe(&self) {
        self.observer.unsubscribe();
    }

    /// Whether the subscription has terminated, by any path.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.observer.is_closed()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
