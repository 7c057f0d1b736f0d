//! Server flavor (instance size) resource client. Read-only catalog.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// A server size offered by the provider. Flavors are identified by slug,
/// not UUID (e.g. `s-2v-4g`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flavor {
    pub id: String,
    pub name: String,
    pub vcpus: u32,
    pub ram_mb: u64,
    pub disk_gb: u64,
}

/// Client for `/flavors`.
#[derive(Debug, Clone)]
pub struct FlavorClient {
    transport: Transport,
}

impl FlavorClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.transport.get("/flavors")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Flavor>, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.transport.get(&format!("/flavors/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Flavor, ApiError> {
        self.transport.decode(response, 200)
    }
}
