#![forbid(unsafe_code)]

//! One-shot run: subscribe to the request stream, then unsubscribe.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pushrx::{Handlers, Observable, Teardown};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DemoError;
use crate::handlers::{Status, handle_complete, handle_error, handle_request};
use crate::requests::Request;

/// Outcome of [`run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// One status per handled request, then one per error.
    pub statuses: Vec<Status>,
    /// Whether the stream completed normally.
    pub completed: bool,
    /// Whether the subscription is closed after the run.
    pub closed: bool,
    /// How many times the stream's teardown ran.
    pub teardowns: u32,
}

/// Push each request, complete, and count teardown runs in `teardowns`.
fn request_stream(
    requests: Vec<Request>,
    teardowns: &Rc<Cell<u32>>,
) -> Observable<Request, String> {
    let teardowns = Rc::clone(teardowns);
    Observable::new(move |observer| {
        for request in &requests {
            observer.next(request.clone());
        }
        observer.complete();
        let teardowns = Rc::clone(&teardowns);
        Teardown::new(move || {
            debug!("unsubscribed");
            teardowns.set(teardowns.get() + 1);
        })
    })
    .with_label("requests")
}

/// Push `requests` through an observable and collect the handler statuses.
pub fn run(requests: Vec<Request>) -> Result<RunReport, DemoError> {
    let statuses = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(Cell::new(false));
    let teardowns = Rc::new(Cell::new(0u32));

    let on_next = Rc::clone(&statuses);
    let on_error = Rc::clone(&statuses);
    let on_complete = Rc::clone(&completed);
    let handlers = Handlers::new()
        .on_next(move |request: Request| on_next.borrow_mut().push(handle_request(&request)))
        .on_error(move |reason: String| on_error.borrow_mut().push(handle_error(&reason)))
        .on_complete(move || {
            handle_complete();
            on_complete.set(true);
        });

    let subscription = request_stream(requests, &teardowns).subscribe(handlers)?;
    subscription.unsubscribe();

    let report = RunReport {
        statuses: statuses.take(),
        completed: completed.get(),
        closed: subscription.is_closed(),
        teardowns: teardowns.get(),
    };
    info!(handled = report.statuses.len(), "run finished");
    Ok(report)
}
