//! Shared transport underneath every resource client.
//!
//! # Design
//! `Transport` holds the base URL and the optional bearer token, and owns
//! everything the resource clients have in common: URL joining, header
//! injection, JSON encoding of request payloads, and the translation of
//! response status codes into [`ApiError`] variants. Resource clients reduce
//! to one `build_*`/`parse_*` pair per operation, each a one-liner through
//! this type.
//!
//! There are no retries, no backoff, and no pagination here: one method
//! call is one request.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Request builder and response decoder shared by all resource clients.
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    token: Option<String>,
}

impl Transport {
    /// Transport without credentials. Requests carry no `authorization`
    /// header; the server will reject anything that requires auth.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Transport that injects `authorization: Bearer <token>` into every
    /// request.
    pub fn with_token(base_url: &str, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..Self::new(base_url)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Headers attached to every request.
    fn base_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        self.bodyless(HttpMethod::Get, path)
    }

    pub fn delete(&self, path: &str) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, path)
    }

    pub fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        self.bodied(HttpMethod::Post, path, payload)
    }

    pub fn put<T: Serialize>(&self, path: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        self.bodied(HttpMethod::Put, path, payload)
    }

    fn bodyless(&self, method: HttpMethod, path: &str) -> HttpRequest {
        debug!("building {} {path}", method.as_str());
        HttpRequest {
            path: self.url(path),
            headers: self.base_headers(),
            body: None,
            method,
        }
    }

    fn bodied<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        debug!("building {} {path} ({} body bytes)", method.as_str(), body.len());
        let mut headers = self.base_headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            path: self.url(path),
            headers,
            body: Some(body),
            method,
        })
    }

    /// Check the expected status and deserialize the JSON response body.
    pub fn decode<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
        expected: u16,
    ) -> Result<T, ApiError> {
        check_status(&response, expected)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Check the expected status for operations that return no body.
    pub fn expect_empty(&self, response: HttpResponse, expected: u16) -> Result<(), ApiError> {
        check_status(&response, expected)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        409 => Err(ApiError::Conflict(response.body.clone())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn get_injects_accept_header_only_without_token() {
        let req = Transport::new("http://localhost:3000").get("/servers");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/servers");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn token_is_injected_as_bearer_header() {
        let req = Transport::with_token("http://localhost:3000", "s3cret").get("/servers");
        assert!(req
            .headers
            .contains(&("authorization".to_string(), "Bearer s3cret".to_string())));
    }

    #[test]
    fn bodied_request_carries_content_type_and_json() {
        let transport = Transport::with_token("http://localhost:3000", "s3cret");
        let req = transport
            .post("/volumes", &serde_json::json!({"name": "data", "size_gb": 10}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["size_gb"], 10);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = Transport::new("http://localhost:3000/").get("/flavors");
        assert_eq!(req.path, "http://localhost:3000/flavors");
    }

    #[test]
    fn status_401_maps_to_unauthorized() {
        let err = check_status(&response(401, ""), 200).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn status_404_maps_to_not_found() {
        let err = check_status(&response(404, ""), 200).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn status_409_maps_to_conflict_with_body() {
        let err = check_status(&response(409, "volume is not available"), 202).unwrap_err();
        match err {
            ApiError::Conflict(body) => assert_eq!(body, "volume is not available"),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_status_maps_to_http_error() {
        let err = check_status(&response(500, "boom"), 200).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let transport = Transport::new("http://localhost:3000");
        let err = transport
            .decode::<serde_json::Value>(response(200, "not json"), 200)
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
