#![forbid(unsafe_code)]

//! Lazy, per-subscription producer of values.
//!
//! # Design
//!
//! [`Observable<T, E>`] stores a producer function behind an `Rc`. Nothing
//! runs at construction. Each [`subscribe`](Observable::subscribe) call:
//!
//! 1. builds a fresh [`Observer`] around the caller's [`Handlers`],
//! 2. runs the producer inline with that Observer,
//! 3. attaches the returned [`Teardown`] to the Observer,
//! 4. returns a [`Subscription`] closing over the Observer.
//!
//! The producer sees the guarded Observer, not the raw handlers. A producer
//! that keeps pushing after `complete` or `error` is therefore absorbed.
//!
//! # Failure Modes
//!
//! - **Producer fault**: a fallible producer returning `Err` makes
//!   `subscribe` return that error. The Observer is unsubscribed first, so
//!   later pushes through a leaked handle are dropped.
//! - **Producer panic**: unwinds through `subscribe` untouched.

use std::borrow::Cow;
use std::convert::Infallible;
use std::rc::Rc;

use tracing::{debug, debug_span, warn};

use crate::error::SubscribeError;
use crate::handlers::Handlers;
use crate::observer::Observer;
use crate::subscription::Subscription;
use crate::teardown::Teardown;

type Producer<T, E> = dyn Fn(&Observer<T, E>) -> Result<Teardown, SubscribeError>;

/// A lazy description of how to push values to a subscriber.
///
/// Cloning an `Observable` shares the producer; subscriptions made through
/// either handle are still fully independent.
pub struct Observable<T, E = Infallible> {
    producer: Rc<Producer<T, E>>,
    label: Option<Cow<'static, str>>,
}

// Manual Clone: shares the same Rc.
impl<T, E> Clone for Observable<T, E> {
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
            label: self.label.clone(),
        }
    }
}

impl<T, E> std::fmt::Debug for Observable<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T: 'static, E: 'static> Observable<T, E> {
    /// Wrap an infallible producer.
    ///
    /// The producer runs once per subscription and returns the teardown for
    /// that subscription.
    #[must_use]
    pub fn new(producer: impl Fn(&Observer<T, E>) -> Teardown + 'static) -> Self {
        Self::try_new(move |observer| Ok(producer(observer)))
    }

    /// Wrap a producer that may fail before handing back its teardown.
    #[must_use]
    pub fn try_new(
        producer: impl Fn(&Observer<T, E>) -> Result<Teardown, SubscribeError> + 'static,
    ) -> Self {
        Self {
            producer: Rc::new(producer),
            label: None,
        }
    }

    /// An observable that completes immediately without values.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|observer| {
            observer.complete();
            Teardown::empty()
        })
    }

    /// Name this observable in tracing output and errors.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label set by [`with_label`](Self::with_label).
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the producer for a new subscriber.
    pub fn subscribe(&self, handlers: Handlers<T, E>) -> Result<Subscription, SubscribeError> {
        let label = self.label.as_deref().unwrap_or("anonymous");
        let _span = debug_span!("subscribe", observable = label).entered();

        let observer = Observer::new(handlers);
        match (self.producer)(&observer) {
            Ok(teardown) => observer.attach_teardown(teardown),
            Err(err) => {
                observer.unsubscribe();
                let err = err.with_label(self.label.as_deref());
                warn!(error = %err, "producer failed");
                return Err(err);
            }
        }
        debug!(
            delivered = observer.delivered(),
            closed = observer.is_unsubscribed(),
            "subscribed"
        );
        Ok(Subscription::new(observer))
    }
}

impl<T: Clone + 'static, E: 'static> Observable<T, E> {
    /// Push every element of `values` in order, then complete.
    ///
    /// Each subscription replays its own copy of the sequence. The returned
    /// teardown only logs.
    #[must_use]
    pub fn from_sequence(values: impl IntoIterator<Item = T>) -> Self {
        let values: Rc<[T]> = values.into_iter().collect();
        Self::new(move |observer| {
            for value in values.iter() {
                observer.next(value.clone());
            }
            observer.complete();
            Teardown::new(|| debug!("unsubscribed"))
        })
    }
}

impl<T: Clone + 'static, E: 'static> From<Vec<T>> for Observable<T, E> {
    fn from(values: Vec<T>) -> Self {
        Self::from_sequence(values)
    }
}

impl<T: Clone + 'static, E: 'static> FromIterator<T> for Observable<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequence(iter)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObserverState, Termination};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    trait RecorderExt {
        fn handlers(&self) -> Handlers<i32, String>;
    }

    impl RecorderExt for Rc<Recorder> {
        fn handlers(&self) -> Handlers<i32, String> {
            let on_next = Rc::clone(self);
            let on_error = Rc::clone(self);
            let on_complete = Rc::clone(self);
            Handlers::new()
                .on_next(move |v| on_next.events.borrow_mut().push(format!("next:{v}")))
                .on_error(move |e| on_error.events.borrow_mut().push(format!("error:{e}")))
                .on_complete(move || on_complete.events.borrow_mut().push("complete".into()))
        }
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    #[test]
    fn construction_is_lazy() {
        let runs = Rc::new(Cell::new(0u32));
        let runs_clone = Rc::clone(&runs);
        let obs: Observable<i32> = Observable::new(move |_| {
            runs_clone.set(runs_clone.get() + 1);
            Teardown::empty()
        });
        assert_eq!(runs.get(), 0);

        let _sub = obs.subscribe(Handlers::new()).unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn from_sequence_pushes_in_order_then_completes() {
        let rec = Rc::new(Recorder::default());
        let obs = Observable::from_sequence([1, 2, 3]);
        let sub = obs.subscribe(rec.handlers()).unwrap();

        assert_eq!(rec.events(), vec!["next:1", "next:2", "next:3", "complete"]);
        assert!(sub.is_closed());
    }

    #[test]
    fn empty_sequence_completes_immediately() {
        let rec = Rc::new(Recorder::default());
        let obs: Observable<i32, String> = Observable::from_sequence(Vec::new());
        let _sub = obs.subscribe(rec.handlers()).unwrap();
        assert_eq!(rec.events(), vec!["complete"]);

        let rec = Rc::new(Recorder::default());
        let _sub = Observable::empty().subscribe(rec.handlers()).unwrap();
        assert_eq!(rec.events(), vec!["complete"]);
    }

    #[test]
    fn each_subscription_is_independent() {
        let obs: Observable<i32, String> = vec![10, 20].into();
        let first = Rc::new(Recorder::default());
        let second = Rc::new(Recorder::default());

        let sub_a = obs.subscribe(first.handlers()).unwrap();
        let sub_b = obs.clone().subscribe(second.handlers()).unwrap();

        assert_eq!(first.events(), second.events());
        assert_eq!(first.events(), vec!["next:10", "next:20", "complete"]);
        sub_a.unsubscribe();
        assert!(sub_b.is_closed());
    }

    #[test]
    fn teardown_runs_once_for_sync_producer() {
        let runs = Rc::new(Cell::new(0u32));
        let runs_clone = Rc::clone(&runs);
        let obs: Observable<i32> = Observable::new(move |observer| {
            observer.next(1);
            observer.complete();
            let runs = Rc::clone(&runs_clone);
            Teardown::new(move || runs.set(runs.get() + 1))
        });

        let sub = obs.subscribe(Handlers::new()).unwrap();
        assert_eq!(runs.get(), 1);
        sub.unsubscribe();
        sub.unsubscribe();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn teardown_waits_for_unsubscribe_when_still_active() {
        let runs = Rc::new(Cell::new(0u32));
        let runs_clone = Rc::clone(&runs);
        let obs: Observable<i32> = Observable::new(move |observer| {
            observer.next(1);
            let runs = Rc::clone(&runs_clone);
            Teardown::new(move || runs.set(runs.get() + 1))
        });

        let sub = obs.subscribe(Handlers::new()).unwrap();
        assert!(!sub.is_closed());
        assert_eq!(runs.get(), 0);

        sub.unsubscribe();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn producer_cannot_bypass_termination() {
        let rec = Rc::new(Recorder::default());
        let obs: Observable<i32, String> = Observable::new(|observer| {
            observer.next(1);
            observer.error("bad".into());
            observer.next(2);
            observer.complete();
            Teardown::empty()
        });

        let _sub = obs.subscribe(rec.handlers()).unwrap();
        assert_eq!(rec.events(), vec!["next:1", "error:bad"]);
    }

    #[test]
    fn producer_fault_propagates_and_closes_observer() {
        let leaked: Rc<RefCell<Option<Observer<i32, String>>>> = Rc::new(RefCell::new(None));
        let leaked_clone = Rc::clone(&leaked);
        let obs: Observable<i32, String> = Observable::try_new(move |observer| {
            *leaked_clone.borrow_mut() = Some(observer.clone());
            Err(SubscribeError::producer("connection refused"))
        })
        .with_label("requests");

        let rec = Rc::new(Recorder::default());
        let err = obs.subscribe(rec.handlers()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "producer for `requests` failed: connection refused"
        );

        let observer = leaked.borrow_mut().take().unwrap();
        assert_eq!(
            observer.state(),
            ObserverState::Terminated(Termination::Unsubscribed)
        );
        observer.next(5);
        assert!(rec.events().is_empty());
    }

    #[test]
    fn collect_into_observable() {
        let rec = Rc::new(Recorder::default());
        let obs: Observable<i32, String> = (1..=2).collect();
        let _sub = obs.subscribe(rec.handlers()).unwrap();
        assert_eq!(rec.events(), vec!["next:1", "next:2", "complete"]);
    }

    #[test]
    fn label_and_debug() {
        let obs: Observable<i32> = Observable::empty().with_label("ticks");
        assert_eq!(obs.label(), Some("ticks"));
        let dbg = format!("{obs:?}");
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("ticks"));
    }
}
