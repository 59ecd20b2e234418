#![forbid(unsafe_code)]

//! Mock HTTP request payloads.

use std::time::SystemTime;

use serde::Serialize;

/// Host every mock request targets.
pub const MOCK_HOST: &str = "service.example";
/// Id of the user fetched by the mock GET request.
pub const MOCK_USER_ID: &str = "3f5h67s4s";

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// A user record carried in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
    pub age: u32,
    pub roles: Vec<String>,
    pub created_at: SystemTime,
    pub is_deleted: bool,
}

/// Query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One mock request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub method: Method,
    pub host: String,
    pub path: String,
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<User>,
}

/// The sample user, created at `created_at`.
#[must_use]
pub fn mock_user(created_at: SystemTime) -> User {
    User {
        name: "User Name".to_string(),
        age: 26,
        roles: vec!["user".to_string(), "admin".to_string()],
        created_at,
        is_deleted: false,
    }
}

/// A POST creating the sample user, then a GET fetching a user by id.
#[must_use]
pub fn mock_requests() -> Vec<Request> {
    mock_requests_at(SystemTime::now())
}

/// [`mock_requests`] with a fixed creation time.
#[must_use]
pub fn mock_requests_at(created_at: SystemTime) -> Vec<Request> {
    vec![
        Request {
            method: Method::Post,
            host: MOCK_HOST.to_string(),
            path: "user".to_string(),
            params: Params::default(),
            body: Some(mock_user(created_at)),
        },
        Request {
            method: Method::Get,
            host: MOCK_HOST.to_string(),
            path: "user".to_string(),
            params: Params {
                id: Some(MOCK_USER_ID.to_string()),
            },
            body: None,
        },
    ]
}
