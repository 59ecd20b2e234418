#![forbid(unsafe_code)]

//! pushrx demo binary entry point.

use std::process;

use pushrx_demo::requests::mock_requests;
use pushrx_demo::{DemoError, LogConfig, logging, run};

fn main() {
    let config = LogConfig::from_env();
    if let Err(e) = logging::init(&config) {
        eprintln!("Failed to initialize: {e}");
        process::exit(1);
    }
    if let Err(e) = print_run() {
        eprintln!("Run error: {e}");
        process::exit(1);
    }
}

fn print_run() -> Result<(), DemoError> {
    let requests = mock_requests();
    for request in &requests {
        println!("{}", serde_json::to_string(request)?);
    }
    let report = run(requests)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
