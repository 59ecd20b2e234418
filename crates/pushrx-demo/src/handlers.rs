#![forbid(unsafe_code)]

//! Sample handlers answering requests with status codes.

use serde::Serialize;
use tracing::info;

use crate::requests::Request;

/// HTTP status code returned by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Status(pub u16);

impl Status {
    pub const OK: Self = Self(200);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
}

/// Handle one request.
pub fn handle_request(request: &Request) -> Status {
    info!(method = ?request.method, path = %request.path, "handling request");
    Status::OK
}

/// Handle a failed request stream.
pub fn handle_error(reason: &str) -> Status {
    info!(%reason, "handling error");
    Status::INTERNAL_SERVER_ERROR
}

/// Handle the end of the request stream.
pub fn handle_complete() {
    info!("complete");
}
