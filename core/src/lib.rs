//! Synchronous API client core for a VPS control plane.
//!
//! # Overview
//! Typed request/response models and thin per-resource clients (keypairs,
//! flavors, images, volumes, servers) layered on one shared [`Transport`].
//! The core builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern); the caller executes
//! the actual HTTP round-trip, making the core fully deterministic and
//! testable.
//!
//! # Design
//! - [`VpsClient`] is the entry point: it holds one `Transport` (base URL +
//!   optional bearer token) and hands out per-resource clients.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - The transport centralizes header injection, JSON encoding/decoding, and
//!   the mapping from HTTP status codes to [`ApiError`] variants. Resource
//!   clients contain no logic beyond the verb + URL template + JSON shape.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod flavors;
pub mod http;
pub mod images;
pub mod keypairs;
pub mod servers;
pub mod transport;
pub mod volumes;

pub use client::VpsClient;
pub use error::ApiError;
pub use flavors::{Flavor, FlavorClient};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use images::{Image, ImageClient};
pub use keypairs::{CreateKeypair, Keypair, KeypairClient};
pub use servers::{CreateServer, Server, ServerAction, ServerClient, ServerStatus, UpdateServer};
pub use transport::Transport;
pub use volumes::{AttachVolume, CreateVolume, UpdateVolume, Volume, VolumeClient, VolumeStatus};
