#![forbid(unsafe_code)]

//! Push-based reactive stream primitive.
//!
//! This crate provides a single-subscriber, synchronous observable:
//!
//! - [`Observable`]: a lazy description of how to produce values. Nothing
//!   runs until [`Observable::subscribe`] is called, and every subscription
//!   gets its own producer invocation.
//! - [`Observer`]: the guard around a subscriber's [`Handlers`], enforcing
//!   at-most-once termination and silent suppression of late events.
//! - [`Subscription`]: the handle returned from `subscribe`, exposing
//!   `unsubscribe()`.
//! - [`Teardown`]: the cleanup action a producer hands back, run exactly
//!   once when the subscription terminates.
//!
//! # Architecture
//!
//! The [`Observer`] is an `Rc<RefCell<..>>` handle. The producer receives
//! the guarded Observer (never the raw handlers), so a producer that keeps
//! pushing after `complete` or `error` is absorbed by the guard instead of
//! reaching the subscriber.
//!
//! # Invariants
//!
//! 1. Values reach `next` in the order the producer pushes them.
//! 2. `complete` or `error` is the last delivery of a subscription, and at
//!    most one of them is ever delivered.
//! 3. Teardown runs if and only if the subscription terminates, and never
//!    more than once.
//! 4. `unsubscribe()` is idempotent.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use pushrx::{Handlers, Observable};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let numbers: Observable<u32> = Observable::from_sequence([1, 2, 3]);
//! let subscription = numbers
//!     .subscribe(Handlers::new().on_next(move |n| sink.borrow_mut().push(n)))
//!     .expect("sequence producers never fail");
//!
//! assert_eq!(*seen.borrow(), vec![1, 2, 3]);
//! assert!(subscription.is_closed());
//! ```

pub mod error;
pub mod handlers;
pub mod observable;
pub mod observer;
pub mod subscription;
pub mod teardown;

pub use error::SubscribeError;
pub use handlers::Handlers;
pub use observable::Observable;
pub use observer::{Observer, ObserverState, Termination};
pub use subscription::Subscription;
pub use teardown::Teardown;
