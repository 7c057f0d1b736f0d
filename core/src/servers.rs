//! Server (VPS instance) resource client.
//!
//! Power and resize operations go through a single action endpoint
//! (`POST /servers/{id}/action`) with an internally tagged JSON envelope,
//! e.g. `{"type": "reboot"}` or `{"type": "resize", "flavor_id": "s-2v-4g"}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Lifecycle state of a server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Running,
    Stopped,
    Rebooting,
    Error,
}

/// A virtual private server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub id: Uuid,
    pub name: String,
    pub status: ServerStatus,
    /// Flavor slug, e.g. `s-1v-1g`.
    pub flavor_id: String,
    pub image_id: Uuid,
    pub keypair_id: Option<Uuid>,
    pub public_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for provisioning a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServer {
    pub name: String,
    pub flavor_id: String,
    pub image_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypair_id: Option<Uuid>,
    /// Cloud-init payload passed to the instance on first boot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// Request payload for updating a server. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Action envelope for `POST /servers/{id}/action`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerAction {
    Start,
    Stop,
    Reboot,
    Resize { flavor_id: String },
}

/// Client for `/servers`.
#[derive(Debug, Clone)]
pub struct ServerClient {
    transport: Transport,
}

impl ServerClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.transport.get("/servers")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Server>, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        self.transport.get(&format!("/servers/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Server, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_create(&self, input: &CreateServer) -> Result<HttpRequest, ApiError> {
        self.transport.post("/servers", input)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Server, ApiError> {
        self.transport.decode(response, 201)
    }

    pub fn build_update(&self, id: Uuid, input: &UpdateServer) -> Result<HttpRequest, ApiError> {
        self.transport.put(&format!("/servers/{id}"), input)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Server, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        self.transport.delete(&format!("/servers/{id}"))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.transport.expect_empty(response, 204)
    }

    pub fn build_action(&self, id: Uuid, action: &ServerAction) -> Result<HttpRequest, ApiError> {
        self.transport.post(&format!("/servers/{id}/action"), action)
    }

    pub fn parse_action(&self, response: HttpResponse) -> Result<Server, ApiError> {
        self.transport.decode(response, 202)
    }
}
