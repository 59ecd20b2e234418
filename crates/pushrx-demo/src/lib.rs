#![forbid(unsafe_code)]

//! pushrx demo library.
//!
//! Drives a fixed batch of mock HTTP requests through a
//! [`pushrx::Observable`], answering each with a status code. The request
//! payloads and handlers live here, never in the core crate.
//!
//! # How it fits in the system
//! The demo is a plain consumer of `pushrx`: it builds an observable from a
//! sequence, subscribes with three handlers, then unsubscribes. The binary
//! adds logging setup and prints the outcome as JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod requests;
pub mod run;

pub use config::{LogConfig, LogFormat};
pub use error::DemoError;
pub use run::{RunReport, run};
