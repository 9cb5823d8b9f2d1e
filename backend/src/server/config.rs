//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use million_meters::bootstrap::Storage;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) static_dir: PathBuf,
    pub(crate) storage: Option<Storage>,
}

impl ServerConfig {
    /// Construct a server configuration for the given listener address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, static_dir: PathBuf) -> Self {
        Self {
            bind_addr,
            static_dir,
            storage: None,
        }
    }

    /// Attach opened storage for the persistence-backed services.
    ///
    /// Without storage the server answers from fixture ports.
    #[must_use]
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }
}
