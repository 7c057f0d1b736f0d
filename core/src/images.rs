//! OS image resource client. Read-only catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// A bootable OS image offered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    pub id: Uuid,
    pub name: String,
    pub os: String,
    pub min_disk_gb: u64,
    pub created_at: DateTime<Utc>,
}

/// Client for `/images`.
#[derive(Debug, Clone)]
pub struct ImageClient {
    transport: Transport,
}

impl ImageClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.transport.get("/images")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Image>, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        self.transport.get(&format!("/images/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Image, ApiError> {
        self.transport.decode(response, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn client() -> ImageClient {
        ImageClient::new(Transport::with_token("http://localhost:3000", "test-token"))
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/images");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{
                "id": "00000000-0000-0000-0000-000000000002",
                "name": "Debian 13",
                "os": "debian",
                "min_disk_gb": 10,
                "created_at": "2026-01-01T00:00:00Z"
            }"#
            .to_string(),
        };
        let image = client().parse_get(response).unwrap();
        assert_eq!(image.os, "debian");
        assert_eq!(image.min_disk_gb, 10);
    }
}
