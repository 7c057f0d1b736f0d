//! In-memory mock of the VPS control plane REST API.
//!
//! Backs the core crate's integration tests. State lives in a shared
//! `Arc<RwLock<CloudState>>`; flavors and images are read-only seeded
//! catalogs. Every route requires a non-empty bearer token — any token is
//! accepted, missing or blank ones get 401.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Keypair {
    pub id: Uuid,
    pub name: String,
    pub public_key: String,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateKeypair {
    pub name: String,
    pub public_key: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flavor {
    pub id: String,
    pub name: String,
    pub vcpus: u32,
    pub ram_mb: u64,
    pub disk_gb: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    pub name: String,
    pub os: String,
    pub min_disk_gb: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    Available,
    InUse,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Volume {
    pub id: Uuid,
    pub name: String,
    pub size_gb: u64,
    pub status: VolumeStatus,
    pub server_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateVolume {
    pub name: String,
    pub size_gb: u64,
}

#[derive(Deserialize)]
pub struct UpdateVolume {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct AttachVolume {
    pub server_id: Uuid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Running,
    Stopped,
    Rebooting,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Server {
    pub id: Uuid,
    pub name: String,
    pub status: ServerStatus,
    pub flavor_id: String,
    pub image_id: Uuid,
    pub keypair_id: Option<Uuid>,
    pub public_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateServer {
    pub name: String,
    pub flavor_id: String,
    pub image_id: Uuid,
    #[serde(default)]
    pub keypair_id: Option<Uuid>,
    #[serde(default)]
    pub user_data: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateServer {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerAction {
    Start,
    Stop,
    Reboot,
    Resize { flavor_id: String },
}

/// Mutable side of the control plane. Flavors and images are catalogs, not
/// state; they live in free functions below.
#[derive(Default)]
pub struct CloudState {
    pub keypairs: HashMap<Uuid, Keypair>,
    pub volumes: HashMap<Uuid, Volume>,
    pub servers: HashMap<Uuid, Server>,
}

pub type Db = Arc<RwLock<CloudState>>;

/// Flavors offered by the mock provider.
pub fn flavor_catalog() -> Vec<Flavor> {
    vec![
        Flavor {
            id: "s-1v-1g".to_string(),
            name: "Basic 1".to_string(),
            vcpus: 1,
            ram_mb: 1024,
            disk_gb: 25,
        },
        Flavor {
            id: "s-2v-4g".to_string(),
            name: "Basic 2".to_string(),
            vcpus: 2,
            ram_mb: 4096,
            disk_gb: 50,
        },
        Flavor {
            id: "s-4v-8g".to_string(),
            name: "Performance 4".to_string(),
            vcpus: 4,
            ram_mb: 8192,
            disk_gb: 100,
        },
    ]
}

/// Images offered by the mock provider. Ids are fixed so tests can refer to
/// them across requests.
pub fn image_catalog() -> Vec<Image> {
    vec![
        Image {
            id: Uuid::from_u128(0xA1),
            name: "Debian 13".to_string(),
            os: "debian".to_string(),
            min_disk_gb: 10,
            created_at: Utc::now(),
        },
        Image {
            id: Uuid::from_u128(0xA2),
            name: "Ubuntu 24.04".to_string(),
            os: "ubuntu".to_string(),
            min_disk_gb: 10,
            created_at: Utc::now(),
        },
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(CloudState::default()));
    Router::new()
        .route("/keypairs", get(list_keypairs).post(create_keypair))
        .route("/keypairs/{id}", get(get_keypair).delete(delete_keypair))
        .route("/flavors", get(list_flavors))
        .route("/flavors/{id}", get(get_flavor))
        .route("/images", get(list_images))
        .route("/images/{id}", get(get_image))
        .route("/volumes", get(list_volumes).post(create_volume))
        .route(
            "/volumes/{id}",
            get(get_volume).put(update_volume).delete(delete_volume),
        )
        .route("/volumes/{id}/attach", post(attach_volume))
        .route("/volumes/{id}/detach", post(detach_volume))
        .route("/servers", get(list_servers).post(create_server))
        .route(
            "/servers/{id}",
            get(get_server).put(update_server).delete(delete_server),
        )
        .route("/servers/{id}/action", post(server_action))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reject requests without a non-empty bearer token. Any token value is
/// accepted; the mock only checks the header's presence and shape.
async fn require_bearer(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.is_empty());
    if authorized {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

/// Deterministic stand-in for a real key fingerprint.
fn fingerprint(public_key: &str) -> String {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    public_key.hash(&mut hasher);
    hasher
        .finish()
        .to_be_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn assign_ip(id: Uuid) -> String {
    format!("192.0.2.{}", id.as_u128() % 240 + 10)
}

// --- keypairs ---

async fn list_keypairs(State(db): State<Db>) -> Json<Vec<Keypair>> {
    let state = db.read().await;
    Json(state.keypairs.values().cloned().collect())
}

async fn create_keypair(
    State(db): State<Db>,
    Json(input): Json<CreateKeypair>,
) -> (StatusCode, Json<Keypair>) {
    let keypair = Keypair {
        id: Uuid::new_v4(),
        fingerprint: fingerprint(&input.public_key),
        name: input.name,
        public_key: input.public_key,
        created_at: Utc::now(),
    };
    db.write().await.keypairs.insert(keypair.id, keypair.clone());
    (StatusCode::CREATED, Json(keypair))
}

async fn get_keypair(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Keypair>, StatusCode> {
    let state = db.read().await;
    state.keypairs.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_keypair(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut state = db.write().await;
    state
        .keypairs
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- flavors ---

async fn list_flavors() -> Json<Vec<Flavor>> {
    Json(flavor_catalog())
}

async fn get_flavor(Path(id): Path<String>) -> Result<Json<Flavor>, StatusCode> {
    flavor_catalog()
        .into_iter()
        .find(|f| f.id == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- images ---

async fn list_images() -> Json<Vec<Image>> {
    Json(image_catalog())
}

async fn get_image(Path(id): Path<Uuid>) -> Result<Json<Image>, StatusCode> {
    image_catalog()
        .into_iter()
        .find(|i| i.id == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- volumes ---

async fn list_volumes(State(db): State<Db>) -> Json<Vec<Volume>> {
    let state = db.read().await;
    Json(state.volumes.values().cloned().collect())
}

async fn create_volume(
    State(db): State<Db>,
    Json(input): Json<CreateVolume>,
) -> (StatusCode, Json<Volume>) {
    let volume = Volume {
        id: Uuid::new_v4(),
        name: input.name,
        size_gb: input.size_gb,
        status: VolumeStatus::Available,
        server_id: None,
        created_at: Utc::now(),
    };
    db.write().await.volumes.insert(volume.id, volume.clone());
    (StatusCode::CREATED, Json(volume))
}

async fn get_volume(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Volume>, StatusCode> {
    let state = db.read().await;
    state.volumes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_volume(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateVolume>,
) -> Result<Json<Volume>, StatusCode> {
    let mut state = db.write().await;
    let volume = state.volumes.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        volume.name = name;
    }
    Ok(Json(volume.clone()))
}

async fn delete_volume(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = db.write().await;
    let volume = state
        .volumes
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, "volume not found".to_string()))?;
    if volume.status == VolumeStatus::InUse {
        return Err((StatusCode::CONFLICT, "volume is in use".to_string()));
    }
    state.volumes.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn attach_volume(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<AttachVolume>,
) -> Result<(StatusCode, Json<Volume>), (StatusCode, String)> {
    let mut state = db.write().await;
    if !state.servers.contains_key(&input.server_id) {
        return Err((StatusCode::NOT_FOUND, "server not found".to_string()));
    }
    let volume = state
        .volumes
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, "volume not found".to_string()))?;
    if volume.status != VolumeStatus::Available {
        return Err((StatusCode::CONFLICT, "volume is not available".to_string()));
    }
    volume.status = VolumeStatus::InUse;
    volume.server_id = Some(input.server_id);
    Ok((StatusCode::ACCEPTED, Json(volume.clone())))
}

async fn detach_volume(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Volume>), (StatusCode, String)> {
    let mut state = db.write().await;
    let volume = state
        .volumes
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, "volume not found".to_string()))?;
    if volume.status != VolumeStatus::InUse {
        return Err((StatusCode::CONFLICT, "volume is not attached".to_string()));
    }
    volume.status = VolumeStatus::Available;
    volume.server_id = None;
    Ok((StatusCode::ACCEPTED, Json(volume.clone())))
}

// --- servers ---

async fn list_servers(State(db): State<Db>) -> Json<Vec<Server>> {
    let state = db.read().await;
    Json(state.servers.values().cloned().collect())
}

async fn create_server(
    State(db): State<Db>,
    Json(input): Json<CreateServer>,
) -> Result<(StatusCode, Json<Server>), (StatusCode, String)> {
    if !flavor_catalog().iter().any(|f| f.id == input.flavor_id) {
        return Err((StatusCode::BAD_REQUEST, "unknown flavor".to_string()));
    }
    if !image_catalog().iter().any(|i| i.id == input.image_id) {
        return Err((StatusCode::BAD_REQUEST, "unknown image".to_string()));
    }
    let mut state = db.write().await;
    if let Some(keypair_id) = input.keypair_id {
        if !state.keypairs.contains_key(&keypair_id) {
            return Err((StatusCode::BAD_REQUEST, "unknown keypair".to_string()));
        }
    }
    let id = Uuid::new_v4();
    let server = Server {
        id,
        name: input.name,
        status: ServerStatus::Running,
        flavor_id: input.flavor_id,
        image_id: input.image_id,
        keypair_id: input.keypair_id,
        public_ip: Some(assign_ip(id)),
        created_at: Utc::now(),
    };
    state.servers.insert(server.id, server.clone());
    Ok((StatusCode::CREATED, Json(server)))
}

async fn get_server(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Server>, StatusCode> {
    let state = db.read().await;
    state.servers.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_server(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateServer>,
) -> Result<Json<Server>, StatusCode> {
    let mut state = db.write().await;
    let server = state.servers.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        server.name = name;
    }
    Ok(Json(server.clone()))
}

async fn delete_server(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut state = db.write().await;
    state.servers.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    // Deleting a server releases its volume attachments.
    for volume in state.volumes.values_mut() {
        if volume.server_id == Some(id) {
            volume.status = VolumeStatus::Available;
            volume.server_id = None;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn server_action(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(action): Json<ServerAction>,
) -> Result<(StatusCode, Json<Server>), (StatusCode, String)> {
    if let ServerAction::Resize { flavor_id } = &action {
        if !flavor_catalog().iter().any(|f| &f.id == flavor_id) {
            return Err((StatusCode::BAD_REQUEST, "unknown flavor".to_string()));
        }
    }
    let mut state = db.write().await;
    let server = state
        .servers
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, "server not found".to_string()))?;
    match action {
        ServerAction::Start => server.status = ServerStatus::Running,
        ServerAction::Stop => server.status = ServerStatus::Stopped,
        ServerAction::Reboot => server.status = ServerStatus::Running,
        ServerAction::Resize { flavor_id } => {
            server.flavor_id = flavor_id;
            server.status = ServerStatus::Running;
        }
    }
    Ok((StatusCode::ACCEPTED, Json(server.clone())))
}
