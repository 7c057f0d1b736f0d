//! HTTP messages as plain data.
//!
//! # Design
//! The core crate never performs I/O. Resource clients produce `HttpRequest`
//! values and consume `HttpResponse` values; the caller (host) executes the
//! round-trip in between. This keeps every client deterministic and lets the
//! tests simulate any server behavior without a socket.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved
//! around freely by the host.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Wire name of the method, for logging and for hosts that key dispatch
    /// off a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by the `build_*` methods of the resource clients. `path` is the
/// full URL (base URL already joined); `headers` carry whatever the
/// transport injected, including the bearer token when one is configured.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to the matching `parse_*` method for status checking and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
