//! Block storage volume resource client.
//!
//! Attach and detach are sub-resource actions (`POST /volumes/{id}/attach`)
//! rather than field updates, matching how the control plane models
//! state transitions it performs asynchronously. Both return 202 with the
//! volume snapshot taken after the transition was applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Lifecycle state of a volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    Available,
    InUse,
    Error,
}

/// A block storage volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Volume {
    pub id: Uuid,
    pub name: String,
    pub size_gb: u64,
    pub status: VolumeStatus,
    /// Set while the volume is attached to a server.
    pub server_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVolume {
    pub name: String,
    pub size_gb: u64,
}

/// Request payload for updating a volume. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVolume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request payload for attaching a volume to a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachVolume {
    pub server_id: Uuid,
}

/// Client for `/volumes`.
#[derive(Debug, Clone)]
pub struct VolumeClient {
    transport: Transport,
}

impl VolumeClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.transport.get("/volumes")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Volume>, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        self.transport.get(&format!("/volumes/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Volume, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_create(&self, input: &CreateVolume) -> Result<HttpRequest, ApiError> {
        self.transport.post("/volumes", input)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Volume, ApiError> {
        self.transport.decode(response, 201)
    }

    pub fn build_update(&self, id: Uuid, input: &UpdateVolume) -> Result<HttpRequest, ApiError> {
        self.transport.put(&format!("/volumes/{id}"), input)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Volume, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        self.transport.delete(&format!("/volumes/{id}"))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.transport.expect_empty(response, 204)
    }

    pub fn build_attach(&self, id: Uuid, input: &AttachVolume) -> Result<HttpRequest, ApiError> {
        self.transport.post(&format!("/volumes/{id}/attach"), input)
    }

    pub fn parse_attach(&self, response: HttpResponse) -> Result<Volume, ApiError> {
        self.transport.decode(response, 202)
    }

    pub fn build_detach(&self, id: Uuid) -> Result<HttpRequest, ApiError> {
        self.transport
            .post(&format!("/volumes/{id}/detach"), &serde_json::json!({}))
    }

    pub fn parse_detach(&self, response: HttpResponse) -> Result<Volume, ApiError> {
        self.transport.decode(response, 202)
    }
}
