//! Entry point tying the resource clients to one shared transport.

use crate::flavors::FlavorClient;
use crate::images::ImageClient;
use crate::keypairs::KeypairClient;
use crate::servers::ServerClient;
use crate::transport::Transport;
use crate::volumes::VolumeClient;

/// Top-level client for the VPS control plane.
///
/// Holds a single [`Transport`] and hands out per-resource clients that
/// share it. The client is stateless beyond the base URL and token; cloning
/// it or any resource client is cheap and safe.
#[derive(Debug, Clone)]
pub struct VpsClient {
    transport: Transport,
}

impl VpsClient {
    /// Client authenticating with the given bearer token.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            transport: Transport::with_token(base_url, token),
        }
    }

    /// Client without credentials. Useful for probing; the server rejects
    /// everything that requires auth with 401.
    pub fn unauthenticated(base_url: &str) -> Self {
        Self {
            transport: Transport::new(base_url),
        }
    }

    pub fn keypairs(&self) -> KeypairClient {
        KeypairClient::new(self.transport.clone())
    }

    pub fn flavors(&self) -> FlavorClient {
        FlavorClient::new(self.transport.clone())
    }

    pub fn images(&self) -> ImageClient {
        ImageClient::new(self.transport.clone())
    }

    pub fn volumes(&self) -> VolumeClient {
        VolumeClient::new(self.transport.clone())
    }

    pub fn servers(&self) -> ServerClient {
        ServerClient::new(self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_clients_share_the_base_url() {
        let client = VpsClient::new("http://localhost:3000/", "test-token");
        assert_eq!(
            client.keypairs().build_list().path,
            "http://localhost:3000/keypairs"
        );
        assert_eq!(
            client.servers().build_list().path,
            "http://localhost:3000/servers"
        );
    }

    #[test]
    fn unauthenticated_client_sends_no_token() {
        let client = VpsClient::unauthenticated("http://localhost:3000");
        let req = client.volumes().build_list();
        assert!(!req.headers.iter().any(|(k, _)| k == "authorization"));
    }
}
