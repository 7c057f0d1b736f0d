//! Error types for the VPS API client.
//!
//! # Design
//! Status codes callers routinely branch on get dedicated variants:
//! `Unauthorized` (bad or missing token), `NotFound` (the resource does not
//! exist), and `Conflict` (the operation is invalid in the resource's
//! current state, e.g. attaching a volume that is already in use). All other
//! non-2xx responses land in `HttpError` with the raw status code and body
//! for debugging.

use std::fmt;

/// Errors returned by the `parse_*` methods of the resource clients.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 401 — the bearer token is missing or invalid.
    Unauthorized,

    /// The server returned 404 — the requested resource does not exist.
    NotFound,

    /// The server returned 409 — the operation conflicts with the resource's
    /// current state. Carries the server's message body.
    Conflict(String),

    /// The server returned a non-2xx status not covered by a dedicated
    /// variant.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "authentication failed"),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Conflict(body) => write!(f, "conflict: {body}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
