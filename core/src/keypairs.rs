//! SSH keypair resource client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// An SSH keypair registered with the control plane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Keypair {
    pub id: Uuid,
    pub name: String,
    pub public_key: String,
    /// Derived by the server from the public key material.
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering a keypair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateKeypair {
    pub name: String,
    pub public_key: String,
}

/// Client for `/keypairs`.
#[derive(Debug, Clone)]
pub struct KeypairClient {
    transport: Transport,
}

impl KeypairClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.transport.get("/keypairs")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Keypair>, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        self.transport.get(&format!("/keypairs/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Keypair, ApiError> {
        self.transport.decode(response, 200)
    }

    pub fn build_create(&self, input: &CreateKeypair) -> Result<HttpRequest, ApiError> {
        self.transport.post("/keypairs", input)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Keypair, ApiError> {
        self.transport.decode(response, 201)
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        self.transport.delete(&format!("/keypairs/{id}"))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.transport.expect_empty(response, 204)
    }
}
