use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the service.
///
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Interface to bind; all interfaces by default.
    pub host: IpAddr,
    /// Listening port. The plain `PORT` environment variable overrides it.
    pub port: u16,
    /// Upper bound on the request body, in bytes.
    pub body_limit_bytes: usize,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            body_limit_bytes: 10 * 1024 * 1024,
            log_dir: None,
        }
    }
}
